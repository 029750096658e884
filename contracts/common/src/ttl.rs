use soroban_sdk::{Env, IntoVal, Val};

/// Entries are bumped once fewer than this many ledgers (~30 days) remain.
pub const TTL_THRESHOLD: u32 = 518_400;
/// Target lifetime, in ledgers (~60 days), after a bump.
pub const TTL_EXTEND_TO: u32 = 1_036_800;

/// Extends the lifetime of a persistent entry that was just read or written.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the lifetime of the contract instance and all instance keys.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
