pub mod binder;
pub mod card;
pub mod collection;
pub mod group;
pub mod idol;
pub mod user;

pub use binder::{Binder, BinderDraft};
pub use card::{Card, CardType, EnrichedCard};
pub use collection::Collection;
pub use group::Group;
pub use idol::Idol;
pub use user::{Credentials, Registration, User, UserChanges, UserView};
