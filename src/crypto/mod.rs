// Low-level primitives behind the signed cookies: HMAC-SHA1 hex signatures
// and the base64 envelope around each cookie payload.

pub mod codec;
pub mod hmac;
