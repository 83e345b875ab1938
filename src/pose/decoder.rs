use crate::pose::joints::JointIndex;
use crate::pose::skeleton::BONES;

/// 信頼度の閾値
pub const MIN_CONFIDENCE: f32 = 0.3;

/// 推論出力バッファの長さ (17関節 × (y, x, confidence))
pub const OUTPUT_LEN: usize = JointIndex::COUNT * 3;

/// 撮影フレーム座標系の線分
///
/// Frame Decoder が生成し、Path Accumulator が即座に消費する。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    /// 撮影フレームのピクセル幅
    pub frame_width: u32,
    /// 撮影フレームのピクセル高さ
    pub frame_height: u32,
}

/// 1フレーム分の推論出力から骨格の線分列を生成する
///
/// バッファの並びは関節 i につき `[3i]=y, [3i+1]=x, [3i+2]=confidence`
/// (いずれも 0.0〜1.0 の正規化値)。開始関節の信頼度が `MIN_CONFIDENCE`
/// 未満のボーンはスキップされる。バッファ長が不正な場合は空の列を返し、
/// エラーにはしない (1フレームの失敗でストリームを止めない)。
pub fn decode_segments(output: &[f32], frame_width: u32, frame_height: u32) -> Segments<'_> {
    let bone = if output.len() == OUTPUT_LEN {
        0
    } else {
        BONES.len()
    };
    Segments {
        output,
        frame_width,
        frame_height,
        bone,
    }
}

/// `BONES` を固定順に走査する遅延イテレータ
pub struct Segments<'a> {
    output: &'a [f32],
    frame_width: u32,
    frame_height: u32,
    bone: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        while self.bone < BONES.len() {
            let (from, to) = BONES[self.bone];
            self.bone += 1;

            let from = from.offset();
            let to = to.offset();

            // 開始関節のみで判定する (終了関節は見ない)
            if self.output[from + 2] < MIN_CONFIDENCE {
                continue;
            }

            let w = self.frame_width as f32;
            let h = self.frame_height as f32;

            return Some(Segment {
                x1: self.output[from + 1] * w,
                y1: self.output[from] * h,
                x2: self.output[to + 1] * w,
                y2: self.output[to] * h,
                frame_width: self.frame_width,
                frame_height: self.frame_height,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 全関節を (y, x, confidence) で埋めたバッファを作る
    fn make_output(y: f32, x: f32, confidence: f32) -> Vec<f32> {
        let mut output = Vec::with_capacity(OUTPUT_LEN);
        for _ in 0..JointIndex::COUNT {
            output.extend_from_slice(&[y, x, confidence]);
        }
        output
    }

    fn set_joint(output: &mut [f32], joint: JointIndex, y: f32, x: f32, confidence: f32) {
        let i = joint.offset();
        output[i] = y;
        output[i + 1] = x;
        output[i + 2] = confidence;
    }

    #[test]
    fn test_all_joints_confident() {
        let output = make_output(0.5, 0.5, 0.9);
        let segments: Vec<Segment> = decode_segments(&output, 256, 256).collect();
        assert_eq!(segments.len(), BONES.len());
    }

    #[test]
    fn test_all_joints_below_threshold() {
        let output = make_output(0.5, 0.5, 0.1);
        assert_eq!(decode_segments(&output, 256, 256).count(), 0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let output = make_output(0.5, 0.5, MIN_CONFIDENCE);
        assert_eq!(decode_segments(&output, 256, 256).count(), BONES.len());
    }

    #[test]
    fn test_gates_on_from_joint_only() {
        // 左肩のみ信頼、左肘は低信頼。肩→肘のボーンは終了関節を見ずに出力され、
        // 肘→手首のボーンは開始関節 (肘) が低信頼なので出ない。
        let mut output = make_output(0.0, 0.0, 0.1);
        set_joint(&mut output, JointIndex::LeftShoulder, 0.5, 0.5, 0.9);
        set_joint(&mut output, JointIndex::LeftElbow, 0.6, 0.4, 0.2);

        let segments: Vec<Segment> = decode_segments(&output, 256, 256).collect();
        assert_eq!(segments.len(), 1);

        let s = segments[0];
        assert!((s.x1 - 128.0).abs() < 0.001);
        assert!((s.y1 - 128.0).abs() < 0.001);
        assert!((s.x2 - 102.4).abs() < 0.001);
        assert!((s.y2 - 153.6).abs() < 0.001);
        assert_eq!(s.frame_width, 256);
        assert_eq!(s.frame_height, 256);
    }

    #[test]
    fn test_axis_order_is_y_then_x() {
        let mut output = make_output(0.0, 0.0, 0.1);
        set_joint(&mut output, JointIndex::LeftHip, 0.25, 0.75, 0.9);

        let segments: Vec<Segment> = decode_segments(&output, 100, 200).collect();
        // 左腰を起点とするボーンは 腰→膝、腰→右腰 の2本
        assert_eq!(segments.len(), 2);
        assert!((segments[0].x1 - 75.0).abs() < 0.001);
        assert!((segments[0].y1 - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_emission_follows_bone_order() {
        let output = make_output(0.5, 0.5, 0.9);
        let segments: Vec<Segment> = decode_segments(&output, 256, 256).collect();
        let raw: Vec<(f32, f32)> = BONES
            .iter()
            .map(|(from, _)| {
                (
                    output[from.offset() + 1] * 256.0,
                    output[from.offset()] * 256.0,
                )
            })
            .collect();
        for (segment, (x, y)) in segments.iter().zip(raw) {
            assert_eq!(segment.x1, x);
            assert_eq!(segment.y1, y);
        }
    }

    #[test]
    fn test_short_buffer_emits_nothing() {
        let output = vec![0.9f32; 10];
        assert_eq!(decode_segments(&output, 256, 256).count(), 0);
    }

    #[test]
    fn test_empty_buffer_emits_nothing() {
        assert_eq!(decode_segments(&[], 256, 256).count(), 0);
    }

    #[test]
    fn test_oversized_buffer_emits_nothing() {
        let output = vec![0.9f32; OUTPUT_LEN + 3];
        assert_eq!(decode_segments(&output, 256, 256).count(), 0);
    }
}
