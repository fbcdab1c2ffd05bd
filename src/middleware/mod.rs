pub mod identity;

pub use identity::{require_owner, IdentityResolver, ProxyHeaderIdentity, OWNER_ID_HEADER};
