use std::sync::mpsc::{self, Receiver, Sender};

use crate::overlay::paths::PathAccumulator;
use crate::pose::decoder::Segment;

/// 1フレーム分の描画更新 (クリアフラグ + 線分列)
///
/// キャプチャ側で組み立てられ、そのまま順序どおりに適用される。
/// Transient モードのフレームは clear = true で始まり、
/// Persistent モードでは明示的な要求時のみ clear を立てる。
#[derive(Debug, Clone)]
pub struct FrameBatch {
    pub clear: bool,
    pub segments: Vec<Segment>,
}

impl FrameBatch {
    /// 線分を持たないクリア専用バッチ (カメラ切替時など)
    pub fn clear_only() -> Self {
        Self {
            clear: true,
            segments: Vec::new(),
        }
    }
}

/// キャプチャ側→描画側のバッチチャネルを作る
///
/// FIFO・容量無制限。フレームレートは 15〜20fps に抑えられている前提で、
/// 描画側が遅れてもバッチを落とさずキューに積む。
pub fn overlay_channel() -> (BatchSender, BatchReceiver) {
    let (tx, rx) = mpsc::channel();
    (BatchSender { tx }, BatchReceiver { rx })
}

/// キャプチャコンテキスト側の送信口
#[derive(Clone)]
pub struct BatchSender {
    tx: Sender<FrameBatch>,
}

impl BatchSender {
    /// バッチを送る。ブロックしない。
    ///
    /// 描画側が終了していても無視する。キャプチャループを
    /// 止める理由にはならない。
    pub fn submit(&self, batch: FrameBatch) {
        let _ = self.tx.send(batch);
    }
}

/// 描画コンテキスト側の受信口
pub struct BatchReceiver {
    rx: Receiver<FrameBatch>,
}

impl BatchReceiver {
    /// 溜まっているバッチを到着順にすべて適用し、適用した数を返す
    ///
    /// 1バッチ分の clear + append は途中に他のバッチが割り込まない。
    pub fn drain_into(&self, paths: &mut PathAccumulator) -> usize {
        let mut applied = 0;
        while let Ok(batch) = self.rx.try_recv() {
            if batch.clear {
                paths.reset();
            }
            for segment in &batch.segments {
                paths.append(segment);
            }
            applied += 1;
        }
        applied
    }
}
