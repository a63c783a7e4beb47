// src/editor/ring.rs
// Fixed-size history of the raw bytes read from the terminal, newest first.

#[derive(Debug, Clone)]
pub struct ByteRing {
    ring: Vec<u8>,
    next: usize,
}

impl ByteRing {
    pub fn new(capacity: usize) -> Self {
        ByteRing { ring: vec![0; capacity], next: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.ring.len()
    }

    pub fn insert(&mut self, byte: u8) {
        if self.ring.is_empty() {
            return;
        }
        self.ring[self.next] = byte;
        self.next = (self.next + 1) % self.ring.len();
    }

    /// Most recent byte first. Slots never written read as 0.
    pub fn history(&self) -> Vec<u8> {
        let n = self.ring.len();
        (0..n).map(|j| self.ring[(self.next + n - j - 1) % n]).collect()
    }
}
