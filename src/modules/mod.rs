// Module exports for pure logic
pub mod cookies;
pub mod shuttle;
pub mod guard;
pub mod preferences;      // Quick-edit links + region toggle
pub mod styles;           // Typed style setters
pub mod char_count;       // Text area counter
