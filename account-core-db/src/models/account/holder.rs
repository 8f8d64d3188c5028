use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};

/// Named, coded party on a business account. Stored inline with the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderModel {
    pub code: HeaplessString<20>,
    pub name: HeaplessString<100>,
}

/// Authorised signatory on a business account. Stored inline with the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatoryModel {
    pub code: HeaplessString<20>,
    pub name: HeaplessString<100>,
}
