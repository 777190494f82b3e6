// Platform Duel: a two-player 2.5D platform fighter prototype.

mod config;
mod core;
mod engine;
mod game;

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

use crate::config::GameConfig;
use crate::engine::assets::AssetRoot;
use crate::engine::frame::FrameClock;
use crate::engine::render::Renderer;
use crate::game::Session;

const WINDOW_TITLE: &str = "Platform Duel";
const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

const CONFIG_PATH: &str = "assets/config.json";
const ASSET_DIR: &str = "assets";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load(CONFIG_PATH)?;
    let env = config.environment(0)?;
    let left = Arc::new(config.character(0)?.clone());
    let right = Arc::new(config.character(1)?.clone());

    let event_loop = EventLoop::new().context("creating event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .build(&event_loop)
            .context("creating window")?,
    );

    let aspect = WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32;
    let mut session = Session::new(env, [left, right], aspect);

    let assets = AssetRoot::new(ASSET_DIR);
    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    renderer.upload_scene(session.scene(), &assets)?;

    let mut clock = FrameClock::new();
    info!("entering main loop");

    event_loop.run(move |event, target| match event {
        Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => target.exit(),
            WindowEvent::Resized(size) => renderer.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => {
                session.input_mut().process_keyboard_event(&event);
            }
            WindowEvent::RedrawRequested => {
                let dt = clock.delta();
                session.update(dt);

                match renderer.render(session.scene()) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = window.inner_size();
                        renderer.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("out of graphics memory");
                        target.exit();
                    }
                    Err(e) => error!("render error: {e}"),
                }

                window.set_title(&format!("{WINDOW_TITLE} - {:.0} fps", clock.fps()));
            }
            _ => {}
        },
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;

    Ok(())
}
