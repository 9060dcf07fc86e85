//! EnvPlot - weather station log viewer
//!
//! Desktop application that fetches a weather station's daily CSV logs over
//! FTP and charts indoor and outdoor conditions for a chosen date range.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use envplot::app::EnvPlotApp;

/// Set the macOS application name for the dock
#[cfg(target_os = "macos")]
fn set_macos_app_name() {
    use objc2::{class, msg_send};
    use objc2_foundation::NSString;

    unsafe {
        let app_name = NSString::from_str("EnvPlot");
        let process_info_class = class!(NSProcessInfo);
        let process_info: *mut objc2::runtime::AnyObject =
            msg_send![process_info_class, processInfo];
        let _: () = msg_send![process_info, setProcessName: &*app_name];
    }
}

#[cfg(not(target_os = "macos"))]
fn set_macos_app_name() {}

fn main() -> eframe::Result<()> {
    // Set macOS app name before anything else
    set_macos_app_name();

    tracing_subscriber::fmt::init();

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("EnvPlot - Weather Station Viewer")
            .with_app_id("EnvPlot"),
        ..Default::default()
    };

    eframe::run_native(
        "EnvPlot",
        native_options,
        Box::new(|cc| Ok(Box::new(EnvPlotApp::new(cc)))),
    )
}
