
/// 앵커마다 (기준 레벨, 첫 하프 패턴, 둘째 하프 패턴) 으로 256개 레벨을 만든다
pub fn levels_from_patterns(blocks: &[(u8, u8, u8)]) -> Vec<u8> {
    let mut levels = Vec::with_capacity(blocks.len() * 16);
    for &(base, first, second) in blocks {
        let mut level = base;
        for pattern in [first, second] {
            for k in 0..8 {
                if pattern & (0x80 >> k) != 0 {
                    level += 1;
                }
                levels.push(level);
            }
        }
    }
    levels
}
