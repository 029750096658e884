use soroban_sdk::{contracttype, Address};

/// Identity of a stake position.
///
/// * `Direct(owner)` – a self-custodied participant; tokens move to and from
///   `owner`, and `owner` authorises every operation.
/// * `Managed(custodian, account_id)` – an account held by a custodial
///   manager contract; tokens move to and from `custodian`, which authorises
///   on the account's behalf.
///
/// Two keys are equal only when both the scope and the identifier match, so a
/// direct address and a managed account never share a balance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HolderKey {
    Direct(Address),
    Managed(Address, u64),
}

impl HolderKey {
    /// The address that signs for this holder and sends or receives its tokens.
    pub fn custody_address(&self) -> Address {
        match self {
            HolderKey::Direct(owner) => owner.clone(),
            HolderKey::Managed(custodian, _) => custodian.clone(),
        }
    }

    /// The custodian, if this key is held through a manager.
    pub fn custodian(&self) -> Option<Address> {
        match self {
            HolderKey::Direct(_) => None,
            HolderKey::Managed(custodian, _) => Some(custodian.clone()),
        }
    }

    /// `true` for the reserved managed account id `0`.
    pub fn is_zero(&self) -> bool {
        matches!(self, HolderKey::Managed(_, 0))
    }
}
