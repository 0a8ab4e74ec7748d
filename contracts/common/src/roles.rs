use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");
const ROLE_MEMBERS: Symbol = symbol_short!("ROLE_MBR");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Capabilities recognised by the staking ledger.
///
/// - `Admin`              – grants and revokes every role, including itself.
/// - `ParamsSetter`       – requests and applies timelocked parameter changes
///                          (penalty days, withdraw wait time).
/// - `RewardsDistributor` – funds both reward streams, sets the flat rate and
///                          sweeps unallocated rewards and penalty fees.
///
/// Roles are flat: holding one says nothing about the others.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 1,
    ParamsSetter = 2,
    RewardsDistributor = 3,
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(role: Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, account.clone())
}

fn members_key(role: Role) -> (Symbol, Role) {
    (ROLE_MEMBERS, role)
}

fn extend_ttl(env: &Env, key: &(Symbol, Role, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns `true` if `account` currently holds `role`.
pub fn has_role(env: &Env, account: &Address, role: Role) -> bool {
    let key = role_key(role, account);
    let granted = env.storage().persistent().get(&key).unwrap_or(false);
    if granted {
        extend_ttl(env, &key);
    }
    granted
}

/// Grants `role` to `account`.
/// Only callable internally; callers must verify authorization beforehand.
///
/// Returns `false` when the account already held the role.
pub fn grant_role(env: &Env, account: &Address, role: Role) -> bool {
    if has_role(env, account, role) {
        return false;
    }
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    extend_ttl(env, &key);
    track_member(env, account, role);
    true
}

/// Removes `role` from `account`.
///
/// Returns `false` when the account did not hold the role.
pub fn revoke_role(env: &Env, account: &Address, role: Role) -> bool {
    if !has_role(env, account, role) {
        return false;
    }
    env.storage().persistent().remove(&role_key(role, account));
    untrack_member(env, account, role);
    true
}

// ── Membership Tracking ──────────────────────────────────────────────────────

/// Returns every address currently holding `role`.
pub fn role_members(env: &Env, role: Role) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&members_key(role))
        .unwrap_or(Vec::new(env))
}

fn track_member(env: &Env, account: &Address, role: Role) {
    let mut members = role_members(env, role);
    if !members.contains(account) {
        members.push_back(account.clone());
        env.storage().persistent().set(&members_key(role), &members);
    }
}

fn untrack_member(env: &Env, account: &Address, role: Role) {
    let members = role_members(env, role);
    let mut kept = Vec::new(env);
    for member in members.iter() {
        if member != *account {
            kept.push_back(member);
        }
    }
    env.storage().persistent().set(&members_key(role), &kept);
}
