//! Entry point for the WASM application

use ifc_upload::mount_upload_forms;

pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🏗️  IFC upload - attaching to upload forms");

    mount_upload_forms();
}
