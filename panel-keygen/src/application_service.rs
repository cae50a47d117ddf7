pub mod key_material_service;
