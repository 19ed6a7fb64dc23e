//! Params storage trait.

use crate::StoreError;

/// The singleton params record.
pub trait ParamsStore {
    fn put_params(&self, data: &[u8]) -> Result<(), StoreError>;

    /// `None` until genesis has written the record.
    fn get_params(&self) -> Result<Option<Vec<u8>>, StoreError>;
}
