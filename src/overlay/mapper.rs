/// 撮影フレーム座標を表示座標へ変換する
///
/// 撮影フレームはアスペクト比を保ったままビューポートいっぱいに
/// レターボックス/ピラーボックス配置される前提で、中央寄せオフセットを
/// 差し引く。純粋関数で、ビューポート外に出た点もクランプしない
/// (画面外に描かれるだけで正しい挙動)。
/// フレームと表示の寸法が一致する場合は恒等変換になる。
pub fn map_point(
    x: f32,
    y: f32,
    frame_width: f32,
    frame_height: f32,
    display_width: f32,
    display_height: f32,
) -> (f32, f32) {
    let offset_x = (frame_width - display_width).abs() / 2.0;
    let offset_y = (frame_height - display_height).abs() / 2.0;
    (
        x * (frame_width / display_width) - offset_x,
        y * (frame_height / display_height) - offset_y,
    )
}

/// 解像度に応じて線幅を決めるためのスケール係数
///
/// 座標変換ではなく描画ヒント。`map_point` とは役割が別。
pub fn stroke_scale(video_width: f32, display_width: f32) -> f32 {
    video_width / display_width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_when_dimensions_match() {
        let (x, y) = map_point(123.0, 456.0, 720.0, 1280.0, 720.0, 1280.0);
        assert!((x - 123.0).abs() < 0.001);
        assert!((y - 456.0).abs() < 0.001);
    }

    #[test]
    fn test_known_mapping() {
        // フレーム 100x100 → 表示 50x50: 倍率2、オフセット25
        let (x, y) = map_point(10.0, 20.0, 100.0, 100.0, 50.0, 50.0);
        assert!((x - (-5.0)).abs() < 0.001);
        assert!((y - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_no_clamping_outside_viewport() {
        let (x, _) = map_point(0.0, 0.0, 100.0, 100.0, 50.0, 50.0);
        assert!(x < 0.0);
    }

    #[test]
    fn test_offset_term_is_constant() {
        // 線形項はオフセットを打ち消し合うので
        // map(x1+x2) - map(x1) - map(x2) は常にオフセットと一致する
        let (fw, fh, dw, dh): (f32, f32, f32, f32) = (256.0, 256.0, 1080.0, 1920.0);
        let offset_x = (fw - dw).abs() / 2.0;
        let offset_y = (fh - dh).abs() / 2.0;

        let (ax, ay) = map_point(30.0, 40.0, fw, fh, dw, dh);
        let (bx, by) = map_point(70.0, 110.0, fw, fh, dw, dh);
        let (sx, sy) = map_point(100.0, 150.0, fw, fh, dw, dh);

        assert!((sx - ax - bx - offset_x).abs() < 0.001);
        assert!((sy - ay - by - offset_y).abs() < 0.001);
    }

    #[test]
    fn test_stroke_scale() {
        assert!((stroke_scale(720.0, 360.0) - 2.0).abs() < 0.001);
        assert!((stroke_scale(720.0, 720.0) - 1.0).abs() < 0.001);
    }
}
