//! Royalty Context - Value Objects

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::RoyaltyError;

/// 销售形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleFormat {
    Ebook,
    Paperback,
    Hardcover,
}

impl SaleFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleFormat::Ebook => "ebook",
            SaleFormat::Paperback => "paperback",
            SaleFormat::Hardcover => "hardcover",
        }
    }

    /// 用于说明文本的展示名
    pub fn display_name(&self) -> &'static str {
        match self {
            SaleFormat::Ebook => "Ebook",
            SaleFormat::Paperback => "Paperback",
            SaleFormat::Hardcover => "Hardcover",
        }
    }

    pub fn is_print(&self) -> bool {
        !matches!(self, SaleFormat::Ebook)
    }
}

impl FromStr for SaleFormat {
    type Err = RoyaltyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ebook" => Ok(SaleFormat::Ebook),
            "paperback" => Ok(SaleFormat::Paperback),
            "hardcover" => Ok(SaleFormat::Hardcover),
            other => Err(RoyaltyError::invalid(
                "format",
                format!("unknown format '{}', expected ebook, paperback or hardcover", other),
            )),
        }
    }
}

impl std::fmt::Display for SaleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 版税计算输入
///
/// 不变量:
/// - `file_size_mb` 当且仅当形态为 ebook 时提供
/// - `printing_cost` 当且仅当形态为 paperback / hardcover 时提供
/// - 所有数值非负
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoyaltyInput {
    pub format: SaleFormat,
    pub list_price: Decimal,
    pub file_size_mb: Option<Decimal>,
    pub printing_cost: Option<Decimal>,
}

/// 校验后的成本来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CostBasis {
    Delivery { file_size_mb: Decimal },
    Printing { printing_cost: Decimal },
}

impl RoyaltyInput {
    pub fn ebook(list_price: Decimal, file_size_mb: Decimal) -> Self {
        Self {
            format: SaleFormat::Ebook,
            list_price,
            file_size_mb: Some(file_size_mb),
            printing_cost: None,
        }
    }

    pub fn print(format: SaleFormat, list_price: Decimal, printing_cost: Decimal) -> Self {
        Self {
            format,
            list_price,
            file_size_mb: None,
            printing_cost: Some(printing_cost),
        }
    }

    /// 校验输入，返回该形态对应的成本来源
    pub(super) fn validate(&self) -> Result<CostBasis, RoyaltyError> {
        if self.list_price < Decimal::ZERO {
            return Err(RoyaltyError::invalid("price", "must not be negative"));
        }

        match self.format {
            SaleFormat::Ebook => {
                if self.printing_cost.is_some() {
                    return Err(RoyaltyError::invalid(
                        "printing_cost",
                        "not applicable to ebook",
                    ));
                }
                let file_size_mb = self
                    .file_size_mb
                    .ok_or_else(|| RoyaltyError::invalid("file_size", "required for ebook"))?;
                if file_size_mb < Decimal::ZERO {
                    return Err(RoyaltyError::invalid("file_size", "must not be negative"));
                }
                Ok(CostBasis::Delivery { file_size_mb })
            }
            SaleFormat::Paperback | SaleFormat::Hardcover => {
                if self.file_size_mb.is_some() {
                    return Err(RoyaltyError::invalid(
                        "file_size",
                        format!("not applicable to {}", self.format),
                    ));
                }
                let printing_cost = self.printing_cost.ok_or_else(|| {
                    RoyaltyError::invalid("printing_cost", format!("required for {}", self.format))
                })?;
                if printing_cost < Decimal::ZERO {
                    return Err(RoyaltyError::invalid("printing_cost", "must not be negative"));
                }
                Ok(CostBasis::Printing { printing_cost })
            }
        }
    }
}

/// 推荐定价区间
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedRange {
    pub min: Decimal,
    pub max: Decimal,
    pub reason: String,
}

/// 版税计算结果
///
/// 每次调用新建，调用方持有。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoyaltyResult {
    pub profit_per_sale: Decimal,
    /// 百分比，保留 1 位小数
    #[serde(rename = "royalty_rate")]
    pub royalty_rate_percent: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printing_cost: Option<Decimal>,
    pub recommended_range: RecommendedRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("ebook".parse::<SaleFormat>().unwrap(), SaleFormat::Ebook);
        assert_eq!(" Hardcover ".parse::<SaleFormat>().unwrap(), SaleFormat::Hardcover);

        let err = "audiobook".parse::<SaleFormat>().unwrap_err();
        assert_eq!(err.field(), "format");
    }

    #[test]
    fn test_ebook_requires_file_size() {
        let input = RoyaltyInput {
            format: SaleFormat::Ebook,
            list_price: Decimal::new(499, 2),
            file_size_mb: None,
            printing_cost: None,
        };
        assert_eq!(input.validate().unwrap_err().field(), "file_size");
    }

    #[test]
    fn test_print_rejects_file_size() {
        let input = RoyaltyInput {
            format: SaleFormat::Paperback,
            list_price: Decimal::new(1499, 2),
            file_size_mb: Some(Decimal::ONE),
            printing_cost: Some(Decimal::from(3)),
        };
        assert_eq!(input.validate().unwrap_err().field(), "file_size");
    }

    #[test]
    fn test_negative_price_rejected() {
        let input = RoyaltyInput::print(SaleFormat::Hardcover, Decimal::from(-1), Decimal::from(5));
        assert_eq!(input.validate().unwrap_err().field(), "price");
    }

    #[test]
    fn test_result_wire_format() {
        let result = RoyaltyResult {
            profit_per_sale: Decimal::new(719, 2),
            royalty_rate_percent: Decimal::new(600, 1),
            delivery_cost: None,
            printing_cost: Some(Decimal::new(300, 2)),
            recommended_range: RecommendedRange {
                min: Decimal::new(300, 2),
                max: Decimal::new(900, 2),
                reason: "test".to_string(),
            },
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["profit_per_sale"], serde_json::json!(7.19));
        assert_eq!(json["royalty_rate"], serde_json::json!(60.0));
        assert!(json.get("delivery_cost").is_none());
        assert_eq!(json["recommended_range"]["min"], serde_json::json!(3.0));
    }
}
