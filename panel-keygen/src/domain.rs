pub mod key_material;
pub mod primitive;
pub mod short_id;
