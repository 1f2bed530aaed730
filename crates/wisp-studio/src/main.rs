use anyhow::Result;

use wisp_editor::{Application, EditorConfig};
use wisp_engine::logging::LoggingConfig;

fn main() -> Result<()> {
    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║             WISP CURVE STUDIO          ║");
    println!("  ╠════════════════════════════════════════╣");
    println!("  ║  drag / click   capture control points ║");
    println!("  ║  Z  commit      C  clear               ║");
    println!("  ║  =  -  segments  .  ,  speed           ║");
    println!("  ║  1 B-Spline  2 Catmull-Rom  3 Bezier   ║");
    println!("  ║  space animate  P points  L lines      ║");
    println!("  ║  K  edge collisions                    ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    Application::new()
        .title("Wisp Curve Studio")
        .size(1024.0, 768.0)
        .logging(LoggingConfig::default())
        .config(EditorConfig::default())
        .run()?;

    log::info!("bye");
    Ok(())
}
