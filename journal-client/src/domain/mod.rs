pub mod id;
pub mod identity;
pub mod operation;
pub mod organization;
pub mod profile;
pub mod transaction;

pub use id::{EntryId, JournalId, PeerId, UserId};
pub use identity::{Credentials, Identity, SigningIdentity};
pub use operation::{AccessLevel, Invocation, Operation, RequestAnswer};
pub use organization::OrganizationProfile;
pub use profile::{ConnectionProfile, PeerEndpoint};
pub use transaction::{TransactionKind, TransactionRequest, TransactionResult};
