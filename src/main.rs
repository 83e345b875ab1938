use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use opencv::core::Mat;

use pose_overlay::camera::OpenCvCamera;
use pose_overlay::config::Config;
use pose_overlay::overlay::{stroke_scale, OverlayMode, PathAccumulator, StrokeStyle};
use pose_overlay::pipeline::{overlay_channel, FrameBatch};
use pose_overlay::pose::{decode_segments, preprocess_frame, PoseDetector};
use pose_overlay::render::{Key, MinifbRenderer};

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("Pose Overlay");
    println!("  ESC: 終了 / F: カメラ切替 / C: クリア");

    // カメラを開く (解像度をウィンドウサイズに使う)
    println!("Opening camera {}...", config.camera.index);
    let camera = OpenCvCamera::open(config.camera.index, &config.camera)?;
    let (width, height) = camera.resolution();
    println!("Camera resolution: {}x{}", width, height);

    // モデルを読み込む
    println!("Loading model from {}...", config.model.path);
    let detector = PoseDetector::new(&config.model.path)?;
    println!("Model loaded");

    let input_size = config.model.variant.input_size();
    let mode = config.overlay.mode;
    // ウィンドウはカメラ解像度と同サイズなので通常 scale = 1
    let style = StrokeStyle {
        color: config.overlay.parse_color(),
        width: config.overlay.line_width * stroke_scale(width as f32, width as f32),
    };

    // キャプチャ→描画のハンドオフ
    let (sender, receiver) = overlay_channel();
    let latest_frame: Arc<Mutex<Option<Mat>>> = Arc::new(Mutex::new(None));
    let flip_requested = Arc::new(AtomicBool::new(false));
    let running = Arc::new(AtomicBool::new(true));

    // キャプチャコンテキスト: フレーム取得→前処理→推論→デコード→送信。
    // 描画側を待たずに次のフレームへ進む。
    let capture = {
        let latest_frame = latest_frame.clone();
        let flip_requested = flip_requested.clone();
        let running = running.clone();
        let camera_config = config.camera.clone();
        thread::spawn(move || {
            let mut camera = camera;
            let mut detector = detector;
            let mut index = camera_config.index;
            let interval = Duration::from_secs_f32(1.0 / camera_config.fps.max(1) as f32);

            while running.load(Ordering::Relaxed) {
                let started = Instant::now();

                // カメラ切替要求。切替時は状態をクリアして仕切り直す
                if flip_requested.swap(false, Ordering::Relaxed) {
                    let next = if index == 0 { 1 } else { 0 };
                    match OpenCvCamera::open(next, &camera_config) {
                        Ok(c) => {
                            camera = c;
                            index = next;
                            sender.submit(FrameBatch::clear_only());
                            println!("Switched to camera {}", index);
                        }
                        Err(e) => eprintln!("Camera switch failed: {}", e),
                    }
                }

                let frame = match camera.read_frame() {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("Frame capture error: {}", e);
                        continue;
                    }
                };
                let (frame_width, frame_height) = camera.resolution();

                let output = match preprocess_frame(&frame, input_size)
                    .and_then(|input| detector.detect(input))
                {
                    Ok(output) => output,
                    Err(e) => {
                        eprintln!("Inference error: {}", e);
                        continue;
                    }
                };

                let segments = decode_segments(&output, frame_width, frame_height).collect();
                sender.submit(FrameBatch {
                    clear: mode == OverlayMode::Transient,
                    segments,
                });

                *latest_frame.lock().unwrap() = Some(frame);

                // フレームレート上限まで待つ
                let elapsed = started.elapsed();
                if elapsed < interval {
                    thread::sleep(interval - elapsed);
                }
            }
        })
    };

    // 描画コンテキスト: バッチを到着順に適用し、カメラ画像の上に合成する
    let mut renderer = MinifbRenderer::new("Pose Overlay", width as usize, height as usize)?;
    let mut paths = PathAccumulator::new(mode, width, height, style);

    let mut frame_count = 0u32;
    let mut fps_timer = Instant::now();

    while renderer.is_open() {
        if renderer.is_key_pressed(Key::F) {
            flip_requested.store(true, Ordering::Relaxed);
        }
        if renderer.is_key_pressed(Key::C) {
            paths.reset();
        }

        receiver.drain_into(&mut paths);

        // ロックを描画中に保持しないようクローンしてから描く
        let frame = latest_frame.lock().unwrap().as_ref().map(|m| m.clone());
        if let Some(frame) = frame {
            renderer.draw_frame(&frame)?;
        }
        renderer.draw_paths(paths.paths());
        renderer.update()?;

        frame_count += 1;
        let elapsed = fps_timer.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            println!(
                "FPS: {:.1}, paths: {}",
                frame_count as f32 / elapsed,
                paths.paths().len()
            );
            frame_count = 0;
            fps_timer = Instant::now();
        }
    }

    println!("Shutting down...");
    running.store(false, Ordering::Relaxed);
    let _ = capture.join();
    Ok(())
}
