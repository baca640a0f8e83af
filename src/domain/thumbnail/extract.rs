//! Best-frame extraction.
//!
//! Walks the seek plan with a single decoder, scores each decoded
//! frame, and returns the best JPEG capture. A wall-clock budget races
//! the scan; whichever side settles first wins and the loser's result
//! is discarded.

use super::candidates::seek_plan;
use super::score::{score_frame, EARLY_EXIT_SCORE};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ffmpeg_next as ffmpeg;
use image::codecs::jpeg::JpegEncoder;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Wall-clock budget for one extraction call.
pub const EXTRACT_BUDGET: Duration = Duration::from_secs(30);

/// Raster dimensions used when the stream reports none.
const FALLBACK_WIDTH: u32 = 640;
const FALLBACK_HEIGHT: u32 = 360;

const JPEG_QUALITY: u8 = 75;

#[derive(Debug)]
pub enum ThumbnailError {
    /// The source could not be opened or decoded.
    Load(String),
    /// The budget elapsed before any frame was captured.
    Timeout,
    /// Decoding succeeded but no candidate produced a usable frame.
    NoFrame,
}

impl fmt::Display for ThumbnailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThumbnailError::Load(msg) => write!(f, "failed to load video: {}", msg),
            ThumbnailError::Timeout => write!(f, "thumbnail extraction timed out"),
            ThumbnailError::NoFrame => write!(f, "no usable frame found"),
        }
    }
}

impl std::error::Error for ThumbnailError {}

impl From<ffmpeg::Error> for ThumbnailError {
    fn from(err: ffmpeg::Error) -> Self {
        ThumbnailError::Load(err.to_string())
    }
}

/// One scored capture from the seek plan.
#[derive(Debug, Clone)]
pub struct EncodedFrame {
    /// Seconds into the video this frame was sampled at.
    pub timestamp: f64,
    /// JPEG bytes.
    pub image: Vec<u8>,
    /// Heuristic score; 0 means classified black/invalid.
    pub score: f64,
}

impl EncodedFrame {
    pub fn to_data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", STANDARD.encode(&self.image))
    }
}

/// Extract the most informative frame of `source` as a JPEG.
///
/// The decode loop runs on the blocking pool; captures are published
/// into a shared list so that an expired budget can still settle on
/// the best frame seen so far. Failures here are expected to be
/// non-fatal for callers, who substitute a placeholder image.
pub async fn extract_thumbnail(source: &Path) -> Result<EncodedFrame, ThumbnailError> {
    extract_thumbnail_with_budget(source, EXTRACT_BUDGET).await
}

/// Same as [`extract_thumbnail`] with an explicit wall-clock budget.
pub async fn extract_thumbnail_with_budget(
    source: &Path,
    budget: Duration,
) -> Result<EncodedFrame, ThumbnailError> {
    let source = source.to_path_buf();
    let captures: Arc<Mutex<Vec<EncodedFrame>>> = Arc::new(Mutex::new(Vec::new()));
    let shared = captures.clone();
    let deadline = Instant::now() + budget;

    let scan =
        tokio::task::spawn_blocking(move || extract_best(&source, &shared, deadline));

    match tokio::time::timeout(budget, scan).await {
        Ok(joined) => {
            joined.map_err(|e| ThumbnailError::Load(format!("decoder task failed: {}", e)))?
        }
        // Budget elapsed with the decoder still busy. The scan keeps
        // checking the deadline and will stop on its own; its eventual
        // result is discarded.
        Err(_) => match captures.lock() {
            Ok(seen) => select_best(&seen).cloned().ok_or(ThumbnailError::Timeout),
            Err(_) => Err(ThumbnailError::Timeout),
        },
    }
}

/// Pick the highest-scoring capture; ties keep the earliest. Callers
/// fall back to the least-black frame when every capture scored 0.
pub fn select_best(captures: &[EncodedFrame]) -> Option<&EncodedFrame> {
    let mut best: Option<&EncodedFrame> = None;
    for capture in captures {
        match best {
            Some(current) if capture.score <= current.score => {}
            _ => best = Some(capture),
        }
    }
    best
}

fn extract_best(
    source: &Path,
    captures: &Mutex<Vec<EncodedFrame>>,
    deadline: Instant,
) -> Result<EncodedFrame, ThumbnailError> {
    // Budget may already be spent before the container is even opened.
    if Instant::now() >= deadline {
        return Err(ThumbnailError::Timeout);
    }

    ffmpeg::init()?;

    let mut ictx = ffmpeg::format::input(&source)?;
    let stream = ictx
        .streams()
        .best(ffmpeg::media::Type::Video)
        .ok_or_else(|| ThumbnailError::Load("no video stream".to_string()))?;
    let stream_index = stream.index();
    let time_base = f64::from(stream.time_base());
    let stream_duration = stream.duration();

    let context_decoder =
        ffmpeg::codec::context::Context::from_parameters(stream.parameters())?;
    let mut decoder = context_decoder.decoder().video()?;

    let duration_secs = if ictx.duration() > 0 {
        ictx.duration() as f64 / f64::from(ffmpeg::ffi::AV_TIME_BASE)
    } else if stream_duration > 0 {
        stream_duration as f64 * time_base
    } else {
        return Err(ThumbnailError::Load("unknown duration".to_string()));
    };

    let (out_w, out_h) = if decoder.width() == 0 || decoder.height() == 0 {
        (FALLBACK_WIDTH, FALLBACK_HEIGHT)
    } else {
        (decoder.width(), decoder.height())
    };

    let mut timed_out = false;
    for target in seek_plan(duration_secs) {
        if Instant::now() >= deadline {
            timed_out = true;
            break;
        }

        let frame = match capture_at(
            &mut ictx,
            &mut decoder,
            stream_index,
            time_base,
            target,
            deadline,
        ) {
            Ok(Some(frame)) => frame,
            Ok(None) => continue,
            Err(_) => continue,
        };

        let rgba = match to_tight_rgba(&frame, out_w, out_h) {
            Ok(buf) => buf,
            Err(_) => continue,
        };
        let score = score_frame(&rgba, out_w, out_h);
        let image = match encode_jpeg(&rgba, out_w, out_h) {
            Ok(bytes) => bytes,
            Err(_) => continue,
        };

        let capture = EncodedFrame {
            timestamp: target,
            image,
            score,
        };
        if let Ok(mut seen) = captures.lock() {
            seen.push(capture.clone());
        }
        if score > EARLY_EXIT_SCORE {
            return Ok(capture);
        }
    }

    let best = match captures.lock() {
        Ok(seen) => select_best(&seen).cloned(),
        Err(_) => None,
    };
    match best {
        Some(frame) => Ok(frame),
        None if timed_out => Err(ThumbnailError::Timeout),
        None => Err(ThumbnailError::NoFrame),
    }
}

/// Seek to `target` seconds and decode forward until the first frame
/// presented at or after it. The decoder is flushed before each seek
/// so state never leaks between candidates.
fn capture_at(
    ictx: &mut ffmpeg::format::context::Input,
    decoder: &mut ffmpeg::decoder::Video,
    stream_index: usize,
    time_base: f64,
    target: f64,
    deadline: Instant,
) -> Result<Option<ffmpeg::util::frame::Video>, ffmpeg::Error> {
    let ts = (target * f64::from(ffmpeg::ffi::AV_TIME_BASE)) as i64;
    ictx.seek(ts, ..ts)?;
    decoder.flush();

    for (stream, packet) in ictx.packets() {
        if stream.index() != stream_index {
            continue;
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        decoder.send_packet(&packet)?;
        loop {
            let mut decoded = ffmpeg::util::frame::Video::empty();
            if decoder.receive_frame(&mut decoded).is_err() {
                break;
            }
            match decoded.pts().or_else(|| decoded.timestamp()) {
                Some(pts) if (pts as f64 * time_base) + 1e-3 < target => continue,
                // Reached the target, or the stream carries no
                // timestamps at all; take what the decoder presented.
                _ => return Ok(Some(decoded)),
            }
        }
    }

    // Ran off the end of the container (near-end candidates); drain
    // whatever the decoder still holds.
    decoder.send_eof()?;
    let mut decoded = ffmpeg::util::frame::Video::empty();
    if decoder.receive_frame(&mut decoded).is_ok() {
        return Ok(Some(decoded));
    }
    Ok(None)
}

/// Scale/convert a decoded frame to a tightly-packed RGBA buffer,
/// dropping any row padding ffmpeg added.
fn to_tight_rgba(
    frame: &ffmpeg::util::frame::Video,
    out_w: u32,
    out_h: u32,
) -> Result<Vec<u8>, ffmpeg::Error> {
    let mut scaler = ffmpeg::software::scaling::context::Context::get(
        frame.format(),
        frame.width(),
        frame.height(),
        ffmpeg::format::Pixel::RGBA,
        out_w,
        out_h,
        ffmpeg::software::scaling::flag::Flags::BILINEAR,
    )?;
    let mut rgba = ffmpeg::util::frame::Video::empty();
    scaler.run(frame, &mut rgba)?;

    let row_bytes = rgba.width() as usize * 4;
    let stride = rgba.stride(0);
    let data = rgba.data(0);
    let mut tight = Vec::with_capacity(row_bytes * rgba.height() as usize);
    for row in 0..rgba.height() as usize {
        let start = row * stride;
        tight.extend_from_slice(&data[start..start + row_bytes]);
    }
    Ok(tight)
}

fn encode_jpeg(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ThumbnailError> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    let img = image::RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| ThumbnailError::Load("raster buffer size mismatch".to_string()))?;

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    img.write_with_encoder(encoder)
        .map_err(|e| ThumbnailError::Load(format!("jpeg encode failed: {}", e)))?;
    Ok(out)
}
