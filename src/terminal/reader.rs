// src/terminal/reader.rs
use std::time::Duration;

use tokio::io::{AsyncReadExt, Stdin};
use tokio::runtime::{Builder, Runtime};

use crate::error::Result;

/// How long a read waits before reporting "no input".
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Reads stdin one byte at a time, giving up after a timeout so the caller can tick.
pub struct ByteReader {
    runtime: Option<Runtime>,
    stdin: Stdin,
    timeout: Duration,
}

impl ByteReader {
    pub fn new(timeout: Duration) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let stdin = {
            let _guard = runtime.enter();
            tokio::io::stdin()
        };
        Ok(ByteReader { runtime: Some(runtime), stdin, timeout })
    }

    /// `Ok(None)` when nothing arrived within the timeout.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let Some(runtime) = self.runtime.as_ref() else {
            return Ok(None);
        };
        let stdin = &mut self.stdin;
        let timeout = self.timeout;
        let byte = runtime.block_on(async move {
            match tokio::time::timeout(timeout, stdin.read_u8()).await {
                Ok(read) => read.map(Some),
                Err(_elapsed) => Ok(None),
            }
        })?;
        Ok(byte)
    }
}

impl Drop for ByteReader {
    fn drop(&mut self) {
        // A blocking stdin read may still be parked on the runtime's pool.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
