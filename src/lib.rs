/// Camera capture, edge filtering and display
pub mod capture;

/// The read -> edge -> show loop
pub mod driver;
