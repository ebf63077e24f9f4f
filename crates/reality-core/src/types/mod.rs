mod identity;
mod overrides;
mod variant;

pub use identity::*;
pub use overrides::*;
pub use variant::*;
