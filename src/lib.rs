pub mod composer;
pub mod fonts;
pub mod layout;
