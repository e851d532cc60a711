use serde::{
    Deserialize,
    Serialize
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    pub creator: String,
    /// Seconds allowed for one command, from opening the driver to its last call; 0 disables the deadline.
    pub timeout: u64,
}
