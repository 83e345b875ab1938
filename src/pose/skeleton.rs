use crate::pose::joints::JointIndex;

/// 骨格の接続定義 (開始関節, 終了関節)
///
/// 描画順は固定: 肩→肘、肘→手首、腰→膝、膝→足首、最後に胴体を閉じる4本。
/// 実行時に変更されることはない。
pub const BONES: [(JointIndex, JointIndex); 12] = [
    // 腕
    (JointIndex::LeftShoulder, JointIndex::LeftElbow),
    (JointIndex::RightShoulder, JointIndex::RightElbow),
    (JointIndex::LeftElbow, JointIndex::LeftWrist),
    (JointIndex::RightElbow, JointIndex::RightWrist),
    // 脚
    (JointIndex::LeftHip, JointIndex::LeftKnee),
    (JointIndex::RightHip, JointIndex::RightKnee),
    (JointIndex::LeftKnee, JointIndex::LeftAnkle),
    (JointIndex::RightKnee, JointIndex::RightAnkle),
    // 胴体
    (JointIndex::LeftHip, JointIndex::RightHip),
    (JointIndex::LeftShoulder, JointIndex::RightShoulder),
    (JointIndex::LeftShoulder, JointIndex::LeftHip),
    (JointIndex::RightShoulder, JointIndex::RightHip),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bone_count() {
        assert_eq!(BONES.len(), 12);
    }

    #[test]
    fn test_all_joints_exist() {
        for (from, to) in BONES.iter() {
            assert!(JointIndex::from_index(*from as usize).is_some());
            assert!(JointIndex::from_index(*to as usize).is_some());
        }
    }

    #[test]
    fn test_bone_order() {
        // 先頭は肩→肘、末尾4本は胴体を閉じる
        assert_eq!(BONES[0], (JointIndex::LeftShoulder, JointIndex::LeftElbow));
        assert_eq!(BONES[9], (JointIndex::LeftShoulder, JointIndex::RightShoulder));
        assert_eq!(BONES[11], (JointIndex::RightShoulder, JointIndex::RightHip));
    }
}
