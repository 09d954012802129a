pub mod macros;

pub mod borgun;
pub use self::borgun::Borgun;

pub mod commercehub;
pub use self::commercehub::CommerceHub;
