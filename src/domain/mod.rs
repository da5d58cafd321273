/// +----------------------------------------------------------+
/// | MODULES                                                  |
/// +----------+-------+-------+------------------------------+
/// | Exports:                                                 |
/// |   - models                                               |
/// |   - services                                             |
/// +----------------------------------------------------------+

/// Record types persisted by the storage layer.
pub mod models;

/// Storage, pagination and quiz selection services.
pub mod services;
