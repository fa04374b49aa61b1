#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub seed: u64,
    /// Hard cap on applied decisions per match; guards state-machine
    /// cycles that never reach a terminal phase.
    pub max_steps: u32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EA,
            max_steps: 5_000,
        }
    }
}
