use redb::TableDefinition;

/// Table for storing seller items.
/// Key: seller id as a UUID string
/// Value: serialized Item as bytes
pub const SELLERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("sellers");
