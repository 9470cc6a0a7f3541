//! Tesseract TSV output parsing
//!
//! Columns: level, page_num, block_num, par_num, line_num, word_num,
//! left, top, width, height, conf, text.

use super::types::{OcrError, OcrToken};

const COLUMNS_WITHOUT_TEXT: usize = 11;

/// Parse Tesseract TSV output into tokens, preserving row order.
///
/// A leading header row is skipped. Rows for page/block/line levels carry no
/// text and come back as tokens with empty text.
pub fn parse_tsv(tsv: &str) -> Result<Vec<OcrToken>, OcrError> {
    let mut tokens = Vec::new();

    for (index, raw) in tsv.lines().enumerate() {
        let row = raw.trim_end_matches('\r');
        if row.trim().is_empty() || row.starts_with("level") {
            continue;
        }

        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() < COLUMNS_WITHOUT_TEXT {
            return Err(OcrError::Parse {
                line: index + 1,
                reason: format!(
                    "expected at least {} columns, got {}",
                    COLUMNS_WITHOUT_TEXT,
                    fields.len()
                ),
            });
        }

        let int = |col: usize| -> Result<i32, OcrError> {
            fields[col].trim().parse::<i32>().map_err(|e| OcrError::Parse {
                line: index + 1,
                reason: format!("column {}: {}", col + 1, e),
            })
        };

        let confidence = fields[10].trim().parse::<f32>().map_err(|e| OcrError::Parse {
            line: index + 1,
            reason: format!("confidence: {}", e),
        })?;

        tokens.push(OcrToken {
            left: int(6)?,
            top: int(7)?,
            width: int(8)?,
            height: int(9)?,
            confidence,
            // Any columns past the eleventh belong to the text.
            text: fields
                .get(COLUMNS_WITHOUT_TEXT..)
                .map(|rest| rest.join("\t"))
                .unwrap_or_default(),
        });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t612\t792\t-1\t
2\t1\t1\t0\t0\t0\t36\t40\t200\t22\t-1\t
5\t1\t1\t1\t1\t1\t36\t40\t90\t22\t96.5\tScanned
5\t1\t1\t1\t1\t2\t130\t41\t106\t21\t93.12\tinvoice
5\t1\t1\t1\t1\t3\t240\t41\t4\t21\t12\t 
";

    #[test]
    fn test_parse_sample_rows() {
        let tokens = parse_tsv(SAMPLE).unwrap();
        assert_eq!(tokens.len(), 5);

        assert_eq!(tokens[0].text, "");
        assert_eq!(tokens[2].text, "Scanned");
        assert_eq!(
            (tokens[2].left, tokens[2].top, tokens[2].width, tokens[2].height),
            (36, 40, 90, 22)
        );
        assert_eq!(tokens[3].text, "invoice");
        assert!((tokens[3].confidence - 93.12).abs() < 1e-4);
        assert_eq!(tokens[4].text, " ");
    }

    #[test]
    fn test_parse_without_header_or_trailing_text_column() {
        let tokens = parse_tsv("1\t1\t0\t0\t0\t0\t0\t0\t100\t50\t-1\n").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "");
        assert_eq!(tokens[0].width, 100);
    }

    #[test]
    fn test_parse_rejects_short_rows() {
        let err = parse_tsv("5\t1\t1\n").unwrap_err();
        assert!(matches!(err, OcrError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_non_numeric_geometry() {
        let err = parse_tsv("5\t1\t1\t1\t1\t1\tx\t0\t1\t1\t90\tword\n").unwrap_err();
        assert!(matches!(err, OcrError::Parse { .. }));
    }
}
