//! Column classification by name keywords.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic category inferred for a column from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Amounts, counts, ages, scores.
    Numeric,
    /// Dates and timestamps.
    Date,
    /// Email addresses.
    Email,
    /// Phone numbers.
    Phone,
    /// Web addresses.
    Url,
    /// Identifiers and codes.
    Id,
    /// Postal addresses and location parts.
    Address,
    /// Person or object names.
    Name,
    /// Status and enumerated values.
    Status,
    /// Anything not matched by a keyword list.
    GenericText,
}

/// Keyword-driven categories, in the order they are tested.
///
/// A column name often contains keywords of several categories
/// ("Email_Address" hits both Email and Address); the first match wins.
pub const PRECEDENCE: [Category; 9] = [
    Category::Numeric,
    Category::Date,
    Category::Email,
    Category::Phone,
    Category::Url,
    Category::Id,
    Category::Address,
    Category::Name,
    Category::Status,
];

static NUMERIC_KEYWORDS: &[&str] = &[
    "年龄", "工资", "薪资", "金额", "价格", "数量", "总额", "费用", "成本", "收入", "支出", "余额",
    "佣金", "age", "salary", "wage", "amount", "price", "cost", "fee", "total", "sum", "quantity",
    "count", "income", "revenue", "expense", "balance", "commission", "rate", "percent", "score",
    "rating",
];

static DATE_KEYWORDS: &[&str] = &[
    "日期", "时间", "生日", "入职", "离职", "创建", "更新", "到期", "开始", "结束", "截止", "date",
    "time", "datetime", "timestamp", "birthday", "birth", "created", "updated", "modified",
    "expired", "expiry", "start", "end", "begin", "finish", "deadline", "due", "last", "first",
    "joined", "hired", "registered", "signed",
];

static EMAIL_KEYWORDS: &[&str] = &[
    "邮箱", "邮件", "电邮", "电子邮件", "email", "mail", "e-mail", "contact",
];

static PHONE_KEYWORDS: &[&str] = &[
    "电话", "手机", "联系", "号码", "座机", "固话", "phone", "mobile", "cell", "telephone", "tel",
    "contact", "number", "call",
];

static URL_KEYWORDS: &[&str] = &[
    "网站", "链接", "网址", "主页", "官网", "url", "website", "link", "site", "web", "homepage",
    "domain", "address",
];

static ID_KEYWORDS: &[&str] = &[
    "编号", "代码", "号", "序号", "标识", "代号", "id", "identifier", "code", "number", "no", "num",
    "key", "ref", "reference", "serial", "sequence", "index", "uuid", "guid",
];

static ADDRESS_KEYWORDS: &[&str] = &[
    "地址", "住址", "邮编", "位置", "省", "市", "区", "县", "街道", "address", "location",
    "zipcode", "postcode", "zip", "postal", "street", "city", "state", "province", "country",
    "region", "area", "district",
];

static NAME_KEYWORDS: &[&str] = &[
    "姓名", "名字", "名称", "用户名", "昵称", "name", "firstname", "lastname", "fullname",
    "username", "nickname", "title", "label",
];

static STATUS_KEYWORDS: &[&str] = &[
    "状态", "状况", "情况", "类型", "分类", "级别", "status", "state", "condition", "type",
    "category", "class", "level", "grade", "priority", "stage", "phase",
];

impl Category {
    /// Keywords for this category (lower case; empty for `GenericText`).
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Numeric => NUMERIC_KEYWORDS,
            Category::Date => DATE_KEYWORDS,
            Category::Email => EMAIL_KEYWORDS,
            Category::Phone => PHONE_KEYWORDS,
            Category::Url => URL_KEYWORDS,
            Category::Id => ID_KEYWORDS,
            Category::Address => ADDRESS_KEYWORDS,
            Category::Name => NAME_KEYWORDS,
            Category::Status => STATUS_KEYWORDS,
            Category::GenericText => &[],
        }
    }

    /// Whether a lower-cased column name contains any of this category's keywords.
    fn matches_lower(self, lower: &str) -> bool {
        self.keywords().iter().any(|kw| lower.contains(kw))
    }

    /// Whether a column name contains any of this category's keywords.
    pub fn matches(self, column: &str) -> bool {
        self.matches_lower(&column.to_lowercase())
    }

    /// Classify a column name. First category in [`PRECEDENCE`] whose
    /// keyword list matches wins; otherwise `GenericText`.
    pub fn classify(column: &str) -> Category {
        let lower = column.to_lowercase();
        PRECEDENCE
            .into_iter()
            .find(|c| c.matches_lower(&lower))
            .unwrap_or(Category::GenericText)
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Numeric => "Numeric",
            Category::Date => "Date",
            Category::Email => "Email",
            Category::Phone => "Phone",
            Category::Url => "URL",
            Category::Id => "Identifier",
            Category::Address => "Address",
            Category::Name => "Name",
            Category::Status => "Status",
            Category::GenericText => "Text",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a column name.
pub fn classify(column: &str) -> Category {
    Category::classify(column)
}

/// Whether the column holds ages.
pub(crate) fn implies_age(column: &str) -> bool {
    column.contains("年龄") || column.to_lowercase().contains("age")
}

/// Whether the column holds postal codes.
pub(crate) fn implies_postal_code(column: &str) -> bool {
    column.contains("邮编") || column.to_lowercase().contains("zip")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_address_is_email() {
        assert_eq!(classify("Email_Address"), Category::Email);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("SALARY"), Category::Numeric);
        assert_eq!(classify("Created_At"), Category::Date);
        assert_eq!(classify("WebSite"), Category::Url);
    }

    #[test]
    fn test_chinese_keywords() {
        assert_eq!(classify("年龄"), Category::Numeric);
        assert_eq!(classify("入职日期"), Category::Date);
        assert_eq!(classify("手机"), Category::Phone);
        assert_eq!(classify("家庭住址"), Category::Address);
        assert_eq!(classify("姓名"), Category::Name);
        assert_eq!(classify("状态"), Category::Status);
    }

    #[test]
    fn test_precedence_order() {
        // "page" contains "age": numeric beats everything after it.
        assert_eq!(classify("homepage"), Category::Numeric);
        // "contact" is both an email and a phone keyword.
        assert_eq!(classify("contact"), Category::Email);
        // "address" is a URL keyword, tested before Address.
        assert_eq!(classify("home_address"), Category::Url);
        // "phone_number" hits Phone before Id.
        assert_eq!(classify("phone_number"), Category::Phone);
        // "username" contains "name" but no earlier keyword.
        assert_eq!(classify("username"), Category::Name);
    }

    #[test]
    fn test_fallback_to_generic_text() {
        assert_eq!(classify("remarks"), Category::GenericText);
        assert_eq!(classify(""), Category::GenericText);
        assert_eq!(classify("备注"), Category::GenericText);
    }

    #[test]
    fn test_id_columns() {
        assert_eq!(classify("id"), Category::Id);
        assert_eq!(classify("user_key"), Category::Id);
        assert_eq!(classify("员工编号"), Category::Id);
    }

    #[test]
    fn test_keywords_are_lower_case() {
        for category in PRECEDENCE {
            for kw in category.keywords() {
                assert_eq!(*kw, kw.to_lowercase(), "{kw} in {category}");
            }
        }
    }

    #[test]
    fn test_implied_columns() {
        assert!(implies_age("Age"));
        assert!(implies_age("员工年龄"));
        assert!(!implies_age("salary"));
        assert!(implies_postal_code("ZipCode"));
        assert!(implies_postal_code("邮编"));
        assert!(!implies_postal_code("street"));
    }
}
