pub mod controls;
pub mod datatable;
pub mod debug;
pub mod layout;
pub mod nav;
pub mod text_input;
pub mod toast;
