pub mod event;
pub mod member;
pub mod membership;
pub mod param;
pub mod patch;
pub mod product;

pub use event::{Event, EventPatch, NewEvent};
pub use member::{Member, MemberPatch, MembershipStatus, MembershipType, NewMember};
pub use membership::{Membership, MembershipPatch, NewMembership};
pub use param::Parameter;
pub use product::{NewProduct, Product, ProductPatch};
