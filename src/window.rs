// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023-2024 Michael Ripley

use std::num::NonZeroU32;
use std::rc::Rc;

use debug_print::{debug_eprintln, debug_println};
use softbuffer::SoftBufferError;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::error::OsError;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, StartCause, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{CursorIcon, Icon, Window, WindowId, WindowLevel};

use simple_color_picker::private::canvas::Canvas;
use simple_color_picker::private::eyedropper::PickSession;
use simple_color_picker::private::hotkey::KeyBindings;
use simple_color_picker::private::layout::{restore_position, WINDOW_HEIGHT, WINDOW_WIDTH};
use simple_color_picker::private::line_edit::EditKey;
use simple_color_picker::private::magnifier::{overlay_bounds, Magnifier};
use simple_color_picker::private::picker::PickerState;
use simple_color_picker::private::platform::generic::{DeviceQueryPointer, ScreenshotsCapture};
use simple_color_picker::private::platform::{HotkeyManager, Pointer};
use simple_color_picker::private::settings::{config_path, Settings};
use simple_color_picker::private::ui::{Ui, UiAction, UiKey};
use simple_color_picker::private::util::dialog::DialogWorker;
use simple_color_picker::private::util::image::{generate_icon_rgba, rectangle_center};
use simple_color_picker::private::util::rect::Rect;
use simple_color_picker::private::util::dialog;

use crate::build_constants;

pub type UserEvent = ();
type Surface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

const ICON_SIZE: u32 = 32;

pub struct State {
    settings: Settings,
    ui: Ui,
    main: Option<Context>,
    /// created on the first pick, then hidden and reused
    overlay: Option<Context>,
    /// desktop area the overlay covers
    overlay_bounds: Rect,
    hotkey_manager: Option<HotkeyManager>,
    pointer: DeviceQueryPointer,
    capture: ScreenshotsCapture,
    magnifier: Magnifier,
    /// `Some` while picking
    pick_session: Option<PickSession>,
    /// native dialogs block a thread, so we'll spin up a single thread to loop through queued dialogs.
    /// If we ever need to show multiple dialogs, they just get queued.
    dialog_worker: DialogWorker,
    last_mouse_position: PhysicalPosition<f64>,
}

/// Window context
struct Context {
    window: Rc<Window>,
    surface: Surface,
}

impl Context {
    fn new(window: Window) -> Result<Self, SoftBufferError> {
        // the context is only needed to build the surface; the surface keeps what it needs alive
        let window = Rc::new(window);
        let context = softbuffer::Context::new(window.clone())?;
        let surface: Surface = Surface::new(&context, window.clone())?;
        Ok(Context { window, surface })
    }

    fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Resize the buffer to the window and hand it to `draw` as a canvas.
    fn draw<F>(&mut self, draw: F) -> Result<(), SoftBufferError>
    where
        F: FnOnce(&mut Canvas),
    {
        let PhysicalSize { width, height } = self.window.inner_size();
        let (Some(nonzero_width), Some(nonzero_height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            // minimized, or not mapped yet
            return Ok(());
        };
        self.surface.resize(nonzero_width, nonzero_height)?;
        let mut buffer = self.surface.buffer_mut()?;
        let mut canvas = Canvas::new(&mut buffer, width, height);
        draw(&mut canvas);
        buffer.present()
    }
}

impl State {
    pub fn new(settings: Settings) -> Self {
        let hotkey_manager = HotkeyManager::new(&settings.persisted.key_bindings)
            .or_else(|e| {
                dialog::show_warning(format!("{e}\n\nUsing default hotkeys."));
                HotkeyManager::new(&KeyBindings::default())
            })
            .ok();

        let ui = Ui::new(
            PickerState::new(settings.color(), settings.persisted.raw),
            settings.persisted.tab,
        );
        let magnifier = Magnifier::new(settings.magnifier);

        State {
            settings,
            ui,
            main: None,
            overlay: None,
            overlay_bounds: Rect::default(),
            hotkey_manager,
            pointer: DeviceQueryPointer::default(),
            capture: ScreenshotsCapture,
            magnifier,
            pick_session: None,
            dialog_worker: dialog::spawn_worker(),
            last_mouse_position: PhysicalPosition::default(),
        }
    }

    fn is_picking(&self) -> bool {
        self.pick_session.is_some()
    }

    fn handle_action(&mut self, active_event_loop: &ActiveEventLoop, action: UiAction) {
        match action {
            UiAction::None => (),
            UiAction::Redraw => self.request_main_redraw(),
            UiAction::StartPick => self.start_pick(active_event_loop),
        }
    }

    fn request_main_redraw(&self) {
        if let Some(main) = &self.main {
            main.window.request_redraw();
        }
    }

    fn start_pick(&mut self, active_event_loop: &ActiveEventLoop) {
        if self.is_picking() {
            return;
        }

        let Some(bounds) = overlay_bounds(monitor_rects(active_event_loop)) else {
            dialog::show_warning("No monitors found to pick a color from.".to_string());
            return;
        };
        self.overlay_bounds = bounds;

        if self.overlay.is_none() {
            match init_overlay(active_event_loop, bounds).and_then(|window| Context::new(window).map_err(|e| e.to_string())) {
                Ok(overlay) => self.overlay = Some(overlay),
                Err(e) => {
                    dialog::show_warning(format!("Could not open the eyedropper overlay.\n\n{e}"));
                    return;
                }
            }
        }

        let pointer = self.pointer.poll();
        self.pick_session = Some(PickSession::new(pointer.left_down));
        self.magnifier.clear();
        self.update_magnifier(pointer.x, pointer.y);

        if let Some(overlay) = &self.overlay {
            // monitors may have changed since the overlay was made
            overlay.window.set_outer_position(PhysicalPosition::new(bounds.x, bounds.y));
            let _ = overlay.window.request_inner_size(PhysicalSize::new(bounds.width, bounds.height));
            overlay.window.set_visible(true);
            overlay.window.set_window_level(WindowLevel::AlwaysOnTop);
            overlay.window.focus_window();
            overlay.window.request_redraw();
        }
        debug_println!("pick started over {:?}", bounds);
    }

    fn update_magnifier(&mut self, x: i32, y: i32) {
        if let Err(e) = self.magnifier.update(&self.capture, (x, y), self.overlay_bounds) {
            debug_eprintln!("skipping magnifier frame: {}", e);
        }
    }

    /// Hide the overlay. With `apply`, the sampled color becomes the current color.
    fn end_pick(&mut self, apply: bool) {
        if self.pick_session.take().is_none() {
            return;
        }
        if let Some(overlay) = &self.overlay {
            overlay.window.set_visible(false);
        }
        if apply {
            if let Some(color) = self.magnifier.color() {
                debug_println!("picked {}", color.name());
                self.ui.set_color(color);
            }
        }
        if let Some(main) = &self.main {
            main.window.focus_window();
            main.window.request_redraw();
        }
    }

    /// one tick of the pick loop: follow the cursor and watch for the picking click
    fn pick_tick(&mut self) {
        let pointer = self.pointer.poll();
        self.update_magnifier(pointer.x, pointer.y);
        if let Some(overlay) = &self.overlay {
            overlay.window.request_redraw();
        }
        let complete = self.pick_session.as_mut()
            .map(|session| session.on_pointer(pointer.left_down))
            .unwrap_or(false);
        if complete {
            self.end_pick(true);
        }
    }

    fn shutdown(&mut self, active_event_loop: &ActiveEventLoop) {
        self.end_pick(false);
        let picker = self.ui.picker();
        self.settings.set_color(&picker.color());
        self.settings.persisted.raw = picker.raw();
        self.settings.persisted.tab = self.ui.tab();

        if let Some(main) = &self.main {
            main.window.set_visible(false);
        }
        if let Err(e) = self.settings.save() {
            let path = config_path()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            dialog::show_warning(format!("Error saving settings to \"{path}\".\n\n{e}"));
        }

        // kill the dialog worker and wait for it to finish
        // this makes the application remain open until the user has clicked through any queued dialogs
        if self.dialog_worker.shutdown().is_none() {
            debug_eprintln!("dialog worker did not shut down cleanly");
        }

        active_event_loop.exit();
    }

    fn main_window_event(&mut self, active_event_loop: &ActiveEventLoop, event: WindowEvent) {
        let action = match event {
            WindowEvent::RedrawRequested => {
                if let Some(main) = self.main.as_mut() {
                    let ui = &self.ui;
                    if let Err(e) = main.draw(|canvas| ui.render(canvas)) {
                        debug_eprintln!("failed to draw main window: {}", e);
                    }
                }
                UiAction::None
            }
            WindowEvent::CloseRequested => {
                self.shutdown(active_event_loop);
                UiAction::None
            }
            WindowEvent::Moved(position) => {
                debug_println!("window position changed to {:?}", position);
                self.settings.set_window_position(position.x, position.y);
                UiAction::None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.last_mouse_position = position;
                self.ui.mouse_moved(position.x, position.y)
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                let PhysicalPosition { x, y } = self.last_mouse_position;
                match state {
                    ElementState::Pressed => self.ui.mouse_pressed(x, y),
                    ElementState::Released => self.ui.mouse_released(),
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let PhysicalPosition { x, y } = self.last_mouse_position;
                match delta {
                    MouseScrollDelta::LineDelta(delta_x, delta_y) => self.ui.wheel(x, y, delta_x as f64, delta_y as f64),
                    MouseScrollDelta::PixelDelta(delta) => self.ui.wheel(x, y, delta.x, delta.y),
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.key_pressed(event),
            _ => UiAction::None,
        };
        self.handle_action(active_event_loop, action);
    }

    fn key_pressed(&mut self, event: KeyEvent) -> UiAction {
        if event.state != ElementState::Pressed {
            return UiAction::None;
        }
        if event.logical_key == Key::Named(NamedKey::F1) {
            dialog::show_info(format!("{}\nversion {}", build_constants::APPLICATION_NAME, env!("CARGO_PKG_VERSION")));
            return UiAction::None;
        }
        let key = match &event.logical_key {
            Key::Named(NamedKey::Backspace) => Some(UiKey::Edit(EditKey::Backspace)),
            Key::Named(NamedKey::Delete) => Some(UiKey::Edit(EditKey::Delete)),
            Key::Named(NamedKey::ArrowLeft) => Some(UiKey::Edit(EditKey::Left)),
            Key::Named(NamedKey::ArrowRight) => Some(UiKey::Edit(EditKey::Right)),
            Key::Named(NamedKey::Home) => Some(UiKey::Edit(EditKey::Home)),
            Key::Named(NamedKey::End) => Some(UiKey::Edit(EditKey::End)),
            Key::Named(NamedKey::Enter) => Some(UiKey::Enter),
            Key::Named(NamedKey::Escape) => Some(UiKey::Escape),
            Key::Named(NamedKey::Tab) => Some(UiKey::Tab),
            _ => None,
        };
        match (key, event.text) {
            (Some(key), _) => self.ui.edit_key(key),
            (None, Some(text)) => self.ui.text_input(&text),
            (None, None) => UiAction::None,
        }
    }

    fn overlay_window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::RedrawRequested => {
                if let Some(overlay) = self.overlay.as_mut() {
                    let magnifier = &self.magnifier;
                    if let Err(e) = overlay.draw(|canvas| magnifier.draw(canvas)) {
                        debug_eprintln!("failed to draw overlay: {}", e);
                    }
                }
            }
            WindowEvent::CloseRequested => self.end_pick(false),
            WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed && event.logical_key == Key::Named(NamedKey::Escape) => {
                self.end_pick(false);
            }
            _ => (),
        }
    }
}

impl ApplicationHandler<UserEvent> for State {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if matches!(cause, StartCause::Init) {
            let position = self.settings.window_position();
            match init_main_window(event_loop, position).map_err(|e| e.to_string()).and_then(|window| Context::new(window).map_err(|e| e.to_string())) {
                Ok(main) => self.main = Some(main),
                Err(e) => {
                    debug_eprintln!("failed to create main window: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // only used on iOS/Android/Web
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, _event: UserEvent) {
        if let Some(hotkey_manager) = self.hotkey_manager.as_mut() {
            hotkey_manager.poll_keys();
            hotkey_manager.process_keys();
            let pick_color = hotkey_manager.pick_color();
            let cancel_pick = hotkey_manager.cancel_pick();

            if pick_color {
                if self.is_picking() {
                    self.end_pick(false);
                } else {
                    self.start_pick(event_loop);
                }
            } else if cancel_pick {
                self.end_pick(false);
            }
        }

        if self.is_picking() {
            self.pick_tick();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.main.as_ref().is_some_and(|main| main.id() == window_id) {
            self.main_window_event(event_loop, event);
        } else if self.overlay.as_ref().is_some_and(|overlay| overlay.id() == window_id) {
            self.overlay_window_event(event);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // only used on iOS/Android/Web
    }

    fn memory_warning(&mut self, _event_loop: &ActiveEventLoop) {
        // only used on iOS/Android
    }
}

/// bounds of every connected monitor, in desktop coordinates
fn monitor_rects(active_event_loop: &ActiveEventLoop) -> Vec<Rect> {
    active_event_loop.available_monitors()
        .map(|monitor| {
            let PhysicalPosition { x, y } = monitor.position();
            let PhysicalSize { width, height } = monitor.size();
            Rect::new(x, y, width, height)
        })
        .collect()
}

/// The picker window: fixed size, at its last position if that's still on a monitor, otherwise
/// centered on the primary monitor.
fn init_main_window(active_event_loop: &ActiveEventLoop, saved_position: Option<(i32, i32)>) -> Result<Window, OsError> {
    let size = PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let position = restore_position(saved_position, monitor_rects(active_event_loop));
    if saved_position.is_some() && position.is_none() {
        debug_println!("saved window position {:?} is off-screen, recentering", saved_position);
    }
    let position = position.or_else(|| {
        let monitor = active_event_loop.primary_monitor()?;
        let PhysicalPosition { x, y } = monitor.position();
        let PhysicalSize { width, height } = monitor.size();
        let (center_x, center_y) = rectangle_center(x, y, width as i32, height as i32);
        Some((center_x - WINDOW_WIDTH as i32 / 2, center_y - WINDOW_HEIGHT as i32 / 2))
    });

    let icon = match Icon::from_rgba(generate_icon_rgba(ICON_SIZE), ICON_SIZE, ICON_SIZE) {
        Ok(icon) => Some(icon),
        Err(e) => {
            debug_eprintln!("failed to build window icon: {}", e);
            None
        }
    };

    let window_attributes = Window::default_attributes()
        .with_title(build_constants::APPLICATION_NAME)
        .with_inner_size(size)
        .with_min_inner_size(size)
        .with_max_inner_size(size)
        .with_resizable(false)
        .with_window_icon(icon);
    let window_attributes = match position {
        Some((x, y)) => window_attributes.with_position(PhysicalPosition::new(x, y)),
        None => window_attributes,
    };

    active_event_loop.create_window(window_attributes)
}

/// Initialize the eyedropper overlay. This gives a transparent, borderless window that's always
/// on top and covers every monitor.
fn init_overlay(active_event_loop: &ActiveEventLoop, bounds: Rect) -> Result<Window, String> {
    let window_attributes = Window::default_attributes()
        .with_visible(false)
        .with_transparent(true)
        .with_decorations(false)
        .with_resizable(false)
        .with_title(build_constants::APPLICATION_NAME)
        .with_position(PhysicalPosition::new(bounds.x, bounds.y))
        .with_inner_size(PhysicalSize::new(bounds.width, bounds.height))
        .with_window_level(WindowLevel::AlwaysOnTop);

    #[cfg(target_os = "windows")]
    let window_attributes = {
        use winit::platform::windows::WindowAttributesExtWindows;
        window_attributes
            .with_drag_and_drop(false)
            .with_skip_taskbar(true)
    };

    #[cfg(target_os = "macos")]
    let window_attributes = {
        use winit::platform::macos::WindowAttributesExtMacOS;
        window_attributes
            .with_title_hidden(true)
            .with_titlebar_hidden(true)
            .with_has_shadow(false)
    };

    let window = active_event_loop.create_window(window_attributes)
        .map_err(|e| e.to_string())?;
    window.set_cursor(CursorIcon::Crosshair);
    Ok(window)
}
