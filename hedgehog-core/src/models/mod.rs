pub mod locus;
pub mod nucleotide;
pub mod variant;
pub mod window;

// re-export for cleaner imports
pub use self::locus::Locus;
pub use self::nucleotide::complementary_base;
pub use self::variant::Variant;
pub use self::window::Window;
