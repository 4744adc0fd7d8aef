//! Wire format types for provider-specific API protocols
//!
//! Each module holds serde structs matching the request body its provider
//! expects, plus the JSON pointer to the generated text in its response.
//! These types live only at the boundary.

pub mod anthropic;
pub mod google;
pub mod openai;
