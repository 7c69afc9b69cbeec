use log::LevelFilter;
use sdl2::image::LoadTexture;
use sdl2::pixels::Color;

mod config;
mod face;
mod game_state;
mod gui;
mod input_system;
mod interpreter;
mod logging;
mod scene;
mod text;
mod title;

use config::PluginConfig;
use game_state::GameValues;
use gui::{FaceAtlas, Message, SdlSurface};
use input_system::{DemoAction, InputSystem};
use interpreter::{EventCommand, Interpreter};
use scene::MapScene;

// Screen resolution constants
const SCREEN_WIDTH: u32 = 816;
const SCREEN_HEIGHT: u32 = 624;

const ICON_SHEET_PATH: &str = "assets/system/IconSet.png";

/// Event script run on startup and on F5
fn demo_script() -> Vec<EventCommand> {
    vec![
        EventCommand::Plugin("VariableDisplay open".to_string()),
        EventCommand::ShowMessage(Message::with_face(
            "Actor1",
            0,
            "Faces start on the left. Press Enter to continue.",
        )),
        EventCommand::ShowMessage(Message::with_face(
            "Actor1",
            1,
            "Watch this.\\SFR Now I'm over on the right!",
        )),
        EventCommand::Plugin("FaceFlipAutoRight".to_string()),
        EventCommand::ShowMessage(Message::with_face(
            "Actor1",
            1,
            "Auto-right mode mirrors faces on the right.\\SFT Back left, unmirrored.",
        )),
        EventCommand::ChangeGold(250),
        EventCommand::ChangeVariable { id: 1, delta: 3 },
        EventCommand::Plugin("VariableDisplay iDraw true".to_string()),
        EventCommand::Plugin("VariableDisplay iIndex 87".to_string()),
        EventCommand::ShowMessage(Message::new(
            "No face here, so text uses the full width of the window.",
        )),
        EventCommand::Plugin("FaceFlipAutoLeft".to_string()),
        EventCommand::Plugin("ShowFaceOnLeft".to_string()),
    ]
}

fn main() -> Result<(), String> {
    let log_path = logging::default_log_path();
    if let Err(e) = logging::initialize_logger(LevelFilter::Info, Some(log_path.as_path())) {
        eprintln!("Warning: {}", e);
    }

    let config = PluginConfig::load().map_err(|e| format!("Failed to load plugin config: {}", e))?;

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window = video_subsystem
        .window("Message Faces", SCREEN_WIDTH, SCREEN_HEIGHT)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas.set_logical_size(SCREEN_WIDTH, SCREEN_HEIGHT).map_err(|e| e.to_string())?;

    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;

    // Missing art falls back to placeholders
    let mut faces = FaceAtlas::new(&texture_creator, &config.face.face_directory);
    let script = demo_script();
    for command in &script {
        if let EventCommand::ShowMessage(Message { face: Some(face), .. }) = command {
            faces.preload(&face.name);
        }
    }
    let icons = match texture_creator.load_texture(ICON_SHEET_PATH) {
        Ok(texture) => Some(texture),
        Err(e) => {
            log::warn!("Failed to load {}: {}", ICON_SHEET_PATH, e);
            None
        }
    };

    let mut values = GameValues::new();
    values.gain_gold(100);
    values.record_title_progress(3);

    let mut scene = MapScene::new(&config, values, SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut interpreter = Interpreter::new(script);
    let mut input = InputSystem::new();

    log::info!(
        "Face starts on the {:?} with flip mode {}",
        scene.message_window.policy().side(),
        scene.message_window.policy().flip_mode()
    );

    'running: loop {
        input.update_context(scene.message_window.is_busy());

        for action in input.poll_events(&mut event_pump) {
            match action {
                DemoAction::Quit => break 'running,
                DemoAction::AdvanceMessage => scene.message_window.advance(),
                DemoAction::RestartScript if !interpreter.is_running() => {
                    log::info!("Restarting event script");
                    interpreter.restart();
                }
                DemoAction::RestartScript => {}
                DemoAction::Face(command) => {
                    scene.message_window.handle_face_command(command);
                    let policy = scene.message_window.policy();
                    log::info!(
                        "{}: side {:?}, flip mode {}, mirrored {}",
                        command.name(),
                        policy.side(),
                        policy.flip_mode(),
                        policy.flip_enabled()
                    );
                }
                DemoAction::ToggleVariableWindow => {
                    let command = if scene.variable_window.is_open() {
                        gui::VariableCommand::Close
                    } else {
                        gui::VariableCommand::Open
                    };
                    scene.dispatch(interpreter::PluginCommand::VariableDisplay(command));
                }
                DemoAction::CycleAlignment => {
                    let alignment = scene.variable_window.alignment().cycled();
                    scene.dispatch(interpreter::PluginCommand::VariableDisplay(
                        gui::VariableCommand::Align(alignment),
                    ));
                }
                DemoAction::ToggleVariableIcon => {
                    let draw = !scene.variable_window.draw_icon();
                    scene.dispatch(interpreter::PluginCommand::VariableDisplay(
                        gui::VariableCommand::DrawIcon(draw),
                    ));
                }
                DemoAction::GainGold(amount) => scene.values.gain_gold(amount),
                DemoAction::GainTokens(amount) => {
                    let token_variable = config.currency.token_variable;
                    scene.values.add_to_variable(token_variable, amount);
                }
            }
        }

        interpreter.update(&mut scene);
        scene.update();

        canvas.set_draw_color(Color::RGB(40, 70, 50));
        canvas.clear();
        {
            let mut surface = SdlSurface::new(&mut canvas, &faces, icons.as_ref());
            scene.render(&mut surface)?;
        }
        canvas.present();

        // Cap framerate to ~60 FPS
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    log::info!("Exiting");
    Ok(())
}
