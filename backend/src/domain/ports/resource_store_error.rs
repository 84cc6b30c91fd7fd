//! Failure modes shared by every resource repository port.

use super::define_port_error;

define_port_error! {
    /// Errors raised by resource repository adapters.
    pub enum ResourceStoreError {
        /// Connection could not be checked out or established.
        Connection { message: String } => "resource store connection failed: {message}",
        /// Statement failed during execution.
        Query { message: String } => "resource store query failed: {message}",
        /// A storage-level uniqueness constraint on the sibling title fired.
        DuplicateTitle { message: String } => "title already in use: {message}",
        /// A row addressed by the write was not present.
        Missing { message: String } => "record missing: {message}",
    }
}
