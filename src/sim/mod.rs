/// Greedy hourly allocation and admission ordering.
pub mod allocator;
/// Simulation clock for hour-by-hour iteration.
pub mod clock;
pub mod engine;
pub mod kpi;
/// Fixed solar generation profile.
pub mod profile;
/// Per-run appliance runtime accounting.
pub mod runtime;
pub mod types;
