use crc32fast::Hasher;

/// Derive a short, stable seed from a session name using CRC32
pub fn get_session_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for components and tabs within a session
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(session_name: &str) -> Self {
        Self {
            seed: get_session_seed(session_name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Next component id, `comp-<seed>-<n>`
    pub fn next_component_id(&mut self) -> String {
        self.count += 1;
        format!("comp-{}-{}", self.seed, self.count)
    }

    /// Next tab id, `tab-<seed>-<n>`
    pub fn next_tab_id(&mut self) -> String {
        self.count += 1;
        format!("tab-{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
