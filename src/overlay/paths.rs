use serde::Deserialize;

use crate::overlay::mapper::map_point;
use crate::pose::decoder::Segment;

/// デフォルトの線幅
pub const LINE_WIDTH: f32 = 3.0;

/// デフォルトの線色 (RGB)
pub const PATH_COLOR: u32 = 0x000000;

/// パスのライフサイクルポリシー
///
/// Transient: 毎フレーム消去して描き直す。
/// Persistent: 明示的にクリアされるまで軌跡として蓄積する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayMode {
    Transient,
    Persistent,
}

/// 線のスタイル
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: u32,
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: PATH_COLOR,
            width: LINE_WIDTH,
        }
    }
}

/// 表示座標系の線分
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// 描画可能なパス (線分の並びとスタイル)
#[derive(Debug, Clone)]
pub struct OverlayPath {
    pub lines: Vec<Line>,
    pub style: StrokeStyle,
}

/// 描画パスの蓄積器
///
/// 描画状態の唯一の所有者。Transient では単一パスを伸長し、
/// Persistent では append ごとに独立したパスを追加する。
/// レンダラは `paths()` のスナップショットを読むだけ。
pub struct PathAccumulator {
    mode: OverlayMode,
    display_width: u32,
    display_height: u32,
    default_style: StrokeStyle,
    paths: Vec<OverlayPath>,
}

impl PathAccumulator {
    pub fn new(
        mode: OverlayMode,
        display_width: u32,
        display_height: u32,
        default_style: StrokeStyle,
    ) -> Self {
        Self {
            mode,
            display_width,
            display_height,
            default_style,
            paths: Vec::new(),
        }
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    /// 回転などでビューポート寸法が変わったときに呼ぶ
    pub fn set_display_size(&mut self, width: u32, height: u32) {
        self.display_width = width;
        self.display_height = height;
    }

    /// 全パスを消去する
    pub fn reset(&mut self) {
        self.paths.clear();
    }

    /// 線分をデフォルトスタイルで追加する
    pub fn append(&mut self, segment: &Segment) {
        self.append_styled(segment, self.default_style);
    }

    /// 線分をスタイル指定で追加する
    ///
    /// フレームまたはビューポートの寸法が0の場合は何もしない
    /// (座標変換が退化するため)。それ以外で append が捨てられることはない。
    pub fn append_styled(&mut self, segment: &Segment, style: StrokeStyle) {
        if segment.frame_width == 0
            || segment.frame_height == 0
            || self.display_width == 0
            || self.display_height == 0
        {
            return;
        }

        let fw = segment.frame_width as f32;
        let fh = segment.frame_height as f32;
        let dw = self.display_width as f32;
        let dh = self.display_height as f32;

        let (x1, y1) = map_point(segment.x1, segment.y1, fw, fh, dw, dh);
        let (x2, y2) = map_point(segment.x2, segment.y2, fw, fh, dw, dh);
        let line = Line { x1, y1, x2, y2 };

        match self.mode {
            OverlayMode::Transient => match self.paths.last_mut() {
                Some(path) => path.lines.push(line),
                None => self.paths.push(OverlayPath {
                    lines: vec![line],
                    style,
                }),
            },
            OverlayMode::Persistent => self.paths.push(OverlayPath {
                lines: vec![line],
                style,
            }),
        }
    }

    /// 現在のパス一覧のスナップショット
    pub fn paths(&self) -> &[OverlayPath] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
