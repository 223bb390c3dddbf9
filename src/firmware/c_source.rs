//! 압축 테이블을 펌웨어용 C 소스 배열로 출력

use std::fmt::{self, Write};

use crate::core::types::EncodedTable;

/// 한 줄에 쓰는 10진 값 개수
const VALUES_PER_LINE: usize = 32;

/// 출력 형식 옵션
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// 배열 선언 뒤에 붙는 저장 위치 속성 (예: `PROGMEM`)
    pub storage_attribute: Option<String>,
    pub header_guard: String,
    pub includes: Vec<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            storage_attribute: Some("PROGMEM".to_string()),
            header_guard: "TABLES_H".to_string(),
            includes: vec!["stdint.h".to_string()],
        }
    }
}

/// 출력할 테이블 하나
#[derive(Debug, Clone, Copy)]
pub struct TableSection<'a> {
    /// 배열 이름 접두어 (예: `NORMAL_LIGHT_VOLTAGE_TO_EV`)
    pub name: &'a str,
    pub table: &'a EncodedTable,
    /// 펌웨어가 위치에서 빼야 하는 도메인 오프셋. 0 이면 생략
    pub abs_offset: u8,
    /// `#ifdef TEST` 블록에 넣을 무압축 기준 레벨
    pub reference: Option<&'a [u8]>,
}

/// 반올림 비트 배열 이름 접미어
fn rounding_suffix(subdivisions: u8) -> String {
    match subdivisions {
        10 => "TENTHS".to_string(),
        3 => "THIRDS".to_string(),
        x => format!("SUBDIV{}", x),
    }
}

pub struct CSourceEmitter {
    options: EmitOptions,
}

impl CSourceEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    fn declaration(&self, name: &str) -> String {
        match &self.options.storage_attribute {
            Some(attr) => format!("const uint8_t {}[] {} = {{", name, attr),
            None => format!("const uint8_t {}[] = {{", name),
        }
    }

    /// 비트 패턴은 한 줄에 `0b........` 리터럴로
    fn write_patterns(&self, out: &mut String, name: &str, patterns: &[u8]) -> fmt::Result {
        writeln!(out, "{}", self.declaration(name))?;
        for p in patterns {
            write!(out, "0b{:08b},", p)?;
        }
        writeln!(out, "\n}};")
    }

    fn write_decimal(&self, out: &mut String, name: &str, values: &[u8]) -> fmt::Result {
        write!(out, "{}", self.declaration(name))?;
        for (i, v) in values.iter().enumerate() {
            if i % VALUES_PER_LINE == 0 {
                write!(out, "\n    ")?;
            }
            write!(out, "{},", v)?;
        }
        writeln!(out, "\n}};")
    }

    /// 테이블 하나의 배열들
    pub fn write_table(&self, out: &mut String, section: &TableSection<'_>) -> fmt::Result {
        let name = section.name;
        let table = section.table;

        self.write_patterns(out, &format!("{}_BITPATTERNS", name), &table.dictionary)?;
        self.write_decimal(out, &format!("{}_ABS", name), &table.abs)?;
        self.write_decimal(out, &format!("{}_DIFFS", name), &table.diff_index)?;

        if let Some(bits) = &table.rounding_bits {
            let suffix = rounding_suffix(bits.subdivisions);
            self.write_decimal(out, &format!("{}_{}", name, suffix), &bits.bytes)?;
        }
        if section.abs_offset != 0 {
            writeln!(out, "const uint8_t {}_ABS_OFFSET = {};", name, section.abs_offset)?;
        }
        Ok(())
    }

    /// 헤더 가드와 include 를 포함한 전체 파일
    pub fn render(&self, sections: &[TableSection<'_>]) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let guard = &self.options.header_guard;

        writeln!(out, "#ifndef {}\n#define {}\n", guard, guard)?;
        for include in &self.options.includes {
            writeln!(out, "#include <{}>", include)?;
        }
        for section in sections {
            writeln!(out)?;
            self.write_table(&mut out, section)?;
        }

        let tests: Vec<_> = sections
            .iter()
            .filter_map(|s| s.reference.map(|r| (s.name, r)))
            .collect();
        if !tests.is_empty() {
            writeln!(out, "\n#ifdef TEST")?;
            for (name, reference) in tests {
                self.write_decimal(&mut out, &format!("TEST_{}", name), reference)?;
            }
            writeln!(out, "#endif")?;
        }

        writeln!(out, "\n#endif")?;
        Ok(out)
    }
}

impl Default for CSourceEmitter {
    fn default() -> Self {
        Self::new(EmitOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{RoundingBits, TableLayout};

    fn small_table() -> EncodedTable {
        EncodedTable {
            layout: TableLayout::default(),
            abs: (0..16).collect(),
            diff_index: vec![0x01; 16],
            dictionary: vec![0b0000_0000, 0b0100_0100],
            rounding_bits: None,
        }
    }

    #[test]
    fn test_write_table_arrays() {
        let table = small_table();
        let emitter = CSourceEmitter::default();
        let mut out = String::new();
        emitter
            .write_table(
                &mut out,
                &TableSection { name: "NORMAL", table: &table, abs_offset: 8, reference: None },
            )
            .unwrap();

        println!("{}", out);
        assert!(out.contains("const uint8_t NORMAL_BITPATTERNS[] PROGMEM = {\n0b00000000,0b01000100,\n};"));
        assert!(out.contains("const uint8_t NORMAL_ABS[] PROGMEM = {\n    0,1,2,3,"));
        assert!(out.contains("const uint8_t NORMAL_DIFFS[] PROGMEM = {\n    1,1,"));
        assert!(out.contains("const uint8_t NORMAL_ABS_OFFSET = 8;"));
        assert!(!out.contains("TENTHS"));
    }

    #[test]
    fn test_decimal_line_wrapping() {
        let emitter = CSourceEmitter::new(EmitOptions { storage_attribute: None, ..Default::default() });
        let mut out = String::new();
        let values = vec![7u8; 40];
        emitter.write_decimal(&mut out, "X", &values).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "const uint8_t X[] = {");
        assert_eq!(lines[1].matches(',').count(), 32);
        assert_eq!(lines[2].matches(',').count(), 8);
        assert_eq!(lines[3], "};");
    }

    #[test]
    fn test_render_with_rounding_bits_and_test_block() {
        let mut table = small_table();
        table.rounding_bits = Some(RoundingBits { subdivisions: 10, bytes: vec![0xAA; 32] });
        let reference = vec![1u8; 256];

        let source = CSourceEmitter::default()
            .render(&[TableSection {
                name: "STAGE1_LIGHT_VOLTAGE_TO_EV",
                table: &table,
                abs_offset: 0,
                reference: Some(&reference),
            }])
            .unwrap();

        assert!(source.starts_with("#ifndef TABLES_H\n#define TABLES_H\n\n#include <stdint.h>\n"));
        assert!(source.contains("STAGE1_LIGHT_VOLTAGE_TO_EV_TENTHS[] PROGMEM"));
        assert!(source.contains("#ifdef TEST\nconst uint8_t TEST_STAGE1_LIGHT_VOLTAGE_TO_EV[] PROGMEM = {"));
        assert!(!source.contains("_ABS_OFFSET"));
        assert!(source.trim_end().ends_with("#endif"));
    }

    #[test]
    fn test_rounding_suffix() {
        assert_eq!(rounding_suffix(10), "TENTHS");
        assert_eq!(rounding_suffix(3), "THIRDS");
        assert_eq!(rounding_suffix(4), "SUBDIV4");
    }
}
