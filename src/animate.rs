//! Animation assembly from the ordered sequence of rendered frames.
//!
//! GIF output is encoded in-process. Video formats are piped as raw RGBA
//! frames into the system `ffmpeg` binary, which avoids native FFmpeg
//! dev header/lib requirements.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use log::{info, warn};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::error::PipelineError;

/// Encode the rendered frames to `out_path` in the configured format.
/// An empty frame sequence is a logged no-op, not an error.
pub fn encode_animation(
    frames: &[RgbaImage],
    config: &Config,
    out_path: &Path,
) -> Result<(), PipelineError> {
    if frames.is_empty() {
        info!("no frames were rendered, skipping animation encoding");
        return Ok(());
    }

    info!(
        "encoding {} frames to {} at {} fps",
        frames.len(),
        out_path.display(),
        config.fps
    );

    match config.format.as_str() {
        "gif" => encode_gif(frames, config.fps, out_path),
        format => {
            warn!(
                "alpha/transparency support depends on the {} codec and may be silently dropped",
                format
            );
            encode_video(frames, config, out_path)
        }
    }
}

fn encode_gif(frames: &[RgbaImage], fps: u32, out_path: &Path) -> Result<(), PipelineError> {
    let file = File::create(out_path)?;
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite)?;

    // Fixed per-frame duration of 1000/fps milliseconds.
    let delay = Delay::from_numer_denom_ms(1000, fps);

    for image in frames {
        let frame = Frame::from_parts(image.clone(), 0, 0, delay);
        encoder.encode_frame(frame)?;
    }

    Ok(())
}

fn encode_video(
    frames: &[RgbaImage],
    config: &Config,
    out_path: &Path,
) -> Result<(), PipelineError> {
    let (width, height) = frames[0].dimensions();

    let mut child = Command::new("ffmpeg")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", width, height),
            "-r",
            &config.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-crf",
            &config.video_quality.to_string(),
            "-pix_fmt",
            "yuva420p",
        ])
        .arg(out_path)
        .spawn()
        .map_err(|e| {
            PipelineError::Encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {}",
                e
            ))
        })?;

    {
        let Some(stdin) = child.stdin.as_mut() else {
            return Err(PipelineError::Encode("failed to open ffmpeg stdin".to_string()));
        };

        for image in frames {
            stdin
                .write_all(image.as_raw())
                .map_err(|e| PipelineError::Encode(format!("failed to write frame: {}", e)))?;
        }
    }
    drop(child.stdin.take());

    let output = child
        .wait_with_output()
        .map_err(|e| PipelineError::Encode(format!("failed to wait for ffmpeg: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PipelineError::Encode(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::Colormap;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn test_config(format: &str) -> Config {
        Config {
            input_dir: PathBuf::from("in"),
            output_base: PathBuf::from("out"),
            format: format.to_string(),
            colormap: Colormap::Plasma,
            fps: 5,
            normalize: true,
            mask_sea: false,
            boundary_path: None,
            mask_color: [0, 0, 0, 0],
            video_quality: 23,
            text_size: Default::default(),
            font_path: None,
            chart_title: String::new(),
            watermark: String::new(),
            watermark_position: Default::default(),
        }
    }

    #[test]
    fn test_empty_sequence_is_a_no_op() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("anim.gif");

        encode_animation(&[], &test_config("gif"), &out).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn test_gif_encoding_writes_a_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("anim.gif");

        let frames = vec![
            RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255])),
            RgbaImage::from_pixel(4, 4, image::Rgba([0, 255, 0, 255])),
        ];

        encode_animation(&frames, &test_config("gif"), &out).unwrap();

        let metadata = std::fs::metadata(&out).unwrap();
        assert!(metadata.len() > 0);
    }
}
