/*
[INPUT]:  Bearer tokens handed over by the login flow or a saved session
[OUTPUT]: Token storage shared between the client and the store
[POS]:    Auth layer - carries the roster API bearer token
[UPDATE]: When token lifecycle or storage strategy changes
*/

pub mod token;

pub use token::{TokenData, TokenManager};
