//! Configuration for the checkers engine.

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Material
    pub man_value: f64,
    pub king_value: f64,

    // Positional terms
    pub advancement_per_row: f64,
    pub center_bonus: f64,
    pub edge_bonus: f64,
    pub king_center_bonus: f64,
    pub king_row_bonus: f64,

    // Dynamic terms
    pub mobility_per_move: f64,
    pub threat_bonus: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            man_value: 1.0,
            king_value: 3.0,
            advancement_per_row: 0.1,
            center_bonus: 0.05,
            edge_bonus: 0.1,
            king_center_bonus: 0.2,
            king_row_bonus: 0.3,
            mobility_per_move: 0.1,
            threat_bonus: 0.5,
        }
    }
}
