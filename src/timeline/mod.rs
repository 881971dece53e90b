pub mod animated;
pub mod clip;
pub mod frozen;
pub mod playbook;
