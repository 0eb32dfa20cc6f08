//! Form rules for the sign-in, sign-up and budget-entry screens.

use chrono::NaiveDate;

use crate::{
    EngineError, InstallmentMeta, MonthKey, MoneyCents, PaymentMethod, ResultEngine,
    TransactionType,
};

/// Category income is always booked under.
pub const INCOME_CATEGORY: &str = "OTHER";
/// Title used when the form leaves it blank.
pub const DEFAULT_TITLE: &str = "Untitled Transaction";
pub const MIN_PASSWORD_LEN: usize = 8;

const PASSWORD_RULES: &str =
    "Password must include uppercase, lowercase, number, symbol and 8+ chars.";

/// At least 8 characters with an uppercase letter, a lowercase letter, a digit
/// and a symbol (anything outside `A-Za-z0-9`).
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// `local@domain.tld` shape: one `@`, no whitespace, a dot inside the domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn validate_login(username: &str, password: &str) -> ResultEngine<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(EngineError::validation("Username and password are required."));
    }
    Ok(())
}

/// Raw values of the sign-up form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub net_salary_usd: String,
}

/// A sign-up request that passed [`RegisterDraft::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub net_salary_usd: f64,
}

impl RegisterDraft {
    pub fn validate(&self) -> ResultEngine<Registration> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(EngineError::validation("Username is required."));
        }
        if !is_valid_email(&self.email) {
            return Err(EngineError::validation("Please enter a valid email."));
        }
        if !is_valid_password(&self.password) {
            return Err(EngineError::validation(PASSWORD_RULES));
        }
        let salary = self
            .net_salary_usd
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|salary| salary.is_finite() && *salary > 0.0)
            .ok_or_else(|| EngineError::validation("Net salary must be greater than 0."))?;

        Ok(Registration {
            username: username.to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
            net_salary_usd: salary,
        })
    }
}

/// Raw values of the budget-entry form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDraft {
    pub title: String,
    pub amount: String,
    pub date: NaiveDate,
    pub category: String,
    pub kind: TransactionType,
    pub payment_method: PaymentMethod,
    pub is_installment: bool,
    pub installment_months: String,
}

/// A transaction ready to be created; the server assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    pub title: String,
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub category: String,
    pub kind: TransactionType,
    pub payment_method: PaymentMethod,
    pub installment: Option<InstallmentMeta>,
}

impl TransactionDraft {
    /// Checks the form and fills in the fields income entries do not carry.
    pub fn validate(&self) -> ResultEngine<TransactionInput> {
        let amount = self
            .amount
            .parse::<MoneyCents>()
            .ok()
            .filter(|amount| amount.is_positive())
            .ok_or_else(|| EngineError::validation("Please enter a valid amount."))?;

        let title = match self.title.trim() {
            "" => DEFAULT_TITLE.to_string(),
            title => title.to_string(),
        };

        if self.kind == TransactionType::Income {
            return Ok(TransactionInput {
                title,
                amount,
                date: self.date,
                category: INCOME_CATEGORY.to_string(),
                kind: TransactionType::Income,
                payment_method: PaymentMethod::Transfer,
                installment: None,
            });
        }

        let installment = if self.is_installment {
            let months = self
                .installment_months
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|months| *months >= 2)
                .ok_or_else(|| EngineError::validation("Installments must be at least 2 months."))?;
            Some(InstallmentMeta::new(amount, months, MonthKey::of(self.date))?)
        } else {
            None
        };

        if self.category.trim().is_empty() {
            return Err(EngineError::validation("Please select a category."));
        }

        Ok(TransactionInput {
            title,
            amount,
            date: self.date,
            category: self.category.clone(),
            kind: TransactionType::Expense,
            payment_method: self.payment_method,
            installment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense_draft() -> TransactionDraft {
        TransactionDraft {
            title: "  Groceries ".to_string(),
            amount: "1250.50".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            category: "Food".to_string(),
            kind: TransactionType::Expense,
            payment_method: PaymentMethod::Card,
            is_installment: false,
            installment_months: String::new(),
        }
    }

    fn message(err: EngineError) -> String {
        err.to_string()
    }

    #[test]
    fn password_rules() {
        assert!(is_valid_password("Secr3t!pw"));
        assert!(!is_valid_password("Sh0rt!"));
        assert!(!is_valid_password("alllower1!"));
        assert!(!is_valid_password("ALLUPPER1!"));
        assert!(!is_valid_password("NoDigits!!"));
        assert!(!is_valid_password("NoSymbol12"));
        assert_eq!(is_valid_password("abc"), false);
        assert_eq!(is_valid_password("Abcdef1!"), true);
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("  jane@mail.example.com "));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email("jane@example."));
        assert!(!is_valid_email("ja ne@example.com"));
        assert!(!is_valid_email("jane@@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn login_needs_both_fields() {
        assert!(validate_login("jane", "pw").is_ok());
        assert_eq!(
            message(validate_login(" ", "pw").unwrap_err()),
            "Username and password are required."
        );
    }

    #[test]
    fn register_normalizes_fields() {
        let draft = RegisterDraft {
            username: " jane ".to_string(),
            email: " Jane@Example.COM".to_string(),
            password: "Secr3t!pw".to_string(),
            net_salary_usd: "1190".to_string(),
        };
        let registration = draft.validate().unwrap();
        assert_eq!(registration.username, "jane");
        assert_eq!(registration.email, "jane@example.com");
        assert_eq!(registration.net_salary_usd, 1190.0);

        let no_salary = RegisterDraft {
            net_salary_usd: "0".to_string(),
            ..draft.clone()
        };
        assert_eq!(
            message(no_salary.validate().unwrap_err()),
            "Net salary must be greater than 0."
        );
        let weak = RegisterDraft {
            password: "password".to_string(),
            ..draft
        };
        assert_eq!(
            message(weak.validate().unwrap_err()),
            "Password must include uppercase, lowercase, number, symbol and 8+ chars."
        );
    }

    #[test]
    fn expense_keeps_form_values() {
        let input = expense_draft().validate().unwrap();
        assert_eq!(input.title, "Groceries");
        assert_eq!(input.amount, MoneyCents::new(125_050));
        assert_eq!(input.category, "Food");
        assert_eq!(input.payment_method, PaymentMethod::Card);
        assert!(input.installment.is_none());
    }

    #[test]
    fn amount_must_be_positive() {
        for amount in ["", "abc", "0", "-5", "1.234"] {
            let draft = TransactionDraft {
                amount: amount.to_string(),
                ..expense_draft()
            };
            assert_eq!(message(draft.validate().unwrap_err()), "Please enter a valid amount.");
        }
    }

    #[test]
    fn installment_needs_two_months() {
        let mut draft = TransactionDraft {
            is_installment: true,
            installment_months: "1".to_string(),
            ..expense_draft()
        };
        assert_eq!(
            message(draft.validate().unwrap_err()),
            "Installments must be at least 2 months."
        );
        draft.installment_months = "six".to_string();
        assert!(draft.validate().is_err());

        draft.installment_months = "6".to_string();
        let meta = draft.validate().unwrap().installment.unwrap();
        assert_eq!(meta.total, MoneyCents::new(125_050));
        assert_eq!(meta.months, 6);
        assert_eq!(meta.start_month.to_string(), "2026-03");
    }

    #[test]
    fn expense_needs_category() {
        let draft = TransactionDraft {
            category: String::new(),
            ..expense_draft()
        };
        assert_eq!(message(draft.validate().unwrap_err()), "Please select a category.");
    }

    #[test]
    fn income_overrides_expense_fields() {
        let draft = TransactionDraft {
            title: " ".to_string(),
            kind: TransactionType::Income,
            category: String::new(),
            is_installment: true,
            installment_months: "1".to_string(),
            ..expense_draft()
        };
        let input = draft.validate().unwrap();
        assert_eq!(input.title, "Untitled Transaction");
        assert_eq!(input.category, "OTHER");
        assert_eq!(input.payment_method, PaymentMethod::Transfer);
        assert!(input.installment.is_none());
    }
}
