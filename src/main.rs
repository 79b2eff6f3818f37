use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use scene_editor::cli::Cli;
use scene_editor::config::EditorConfig;
use scene_editor::editor::SceneEditor;
use scene_editor::renderer::EditorRenderer;

// === Application ===

struct App {
    config: EditorConfig,
    window: Option<Arc<Window>>,
    renderer: Option<EditorRenderer>,
    editor: SceneEditor,
}

impl App {
    fn new(config: EditorConfig) -> Self {
        let editor = SceneEditor::new(&config);
        Self {
            config,
            window: None,
            renderer: None,
            editor,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Scene Editor")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(EditorRenderer::new(
            window.clone(),
            self.config.background(),
        )) {
            Ok(r) => r,
            Err(e) => {
                log::error!("failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        self.editor.attach_repaint(renderer.context());
        window.request_redraw();

        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        if renderer.handle_event(window, &event).repaint {
            window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                renderer.resize(size);
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let editor = &mut self.editor;
                if let Err(e) = renderer.render(window, |ctx| editor.show(ctx)) {
                    log::error!("render error: {:#}", e);
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = EditorConfig::from_cli(&cli)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);

    log::info!("Scene Editor - drag to orbit, right-drag to pan, scroll to zoom");
    event_loop.run_app(&mut app)?;

    Ok(())
}
