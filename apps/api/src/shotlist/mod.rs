// Shot-list exchange: the CSV codec and the import/export endpoints.
// Import is a full replacement of the stored collection, never a merge.

pub mod codec;
pub mod handlers;
