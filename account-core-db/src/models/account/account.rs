use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::utils::hash_as_i64;

use super::holder::{HolderModel, SignatoryModel};

/// Represents a bank account in the database.
///
/// The account number is the natural key and is unique across the store; `id`
/// is the surrogate primary key. The store is the sole owner of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountModel {
    pub id: Uuid,
    pub account_number: HeaplessString<32>,
    pub product_id: HeaplessString<20>,
    pub customer_id: HeaplessString<20>,
    pub available_balance: Decimal,
    pub create_date: DateTime<Utc>,
    pub modify_date: Option<DateTime<Utc>>,
    pub holders: Option<Vec<HolderModel>>,
    pub signatories: Option<Vec<SignatoryModel>>,

    /// Hash of the previously persisted version (0 for initial create)
    pub antecedent_hash: i64,

    /// Hash of the entity with hash field set to 0
    /// - 0: for new entities not yet persisted
    /// - Non-zero: the version token checked on every update
    pub hash: i64,
}

impl AccountModel {
    /// Whether the record has never been persisted
    pub fn is_new(&self) -> bool {
        self.hash == 0
    }

    /// Compute the version hash of this entity as it currently stands.
    pub fn compute_hash(&self) -> Result<i64, String> {
        let mut entity_for_hashing = self.clone();
        entity_for_hashing.hash = 0;
        hash_as_i64(&entity_for_hashing)
    }
}

impl Identifiable for AccountModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
