/// Click counter shown on the button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    value: u64,
}

impl Counter {
    pub fn increment(&mut self) {
        self.value = self.value.saturating_add(1);
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}
