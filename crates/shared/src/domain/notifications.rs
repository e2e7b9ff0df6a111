use crate::{
    abstract_trait::EmailRequest,
    config::BankConfig,
    domain::order_status::{OrderStatus, PaymentMethod},
    model::{Order, Referral, User},
    utils::EmailTemplateData,
};

/// Formats cents as `1234.50`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Builds the outgoing notification emails.
#[derive(Debug, Clone)]
pub struct Notifications {
    pub public_url: String,
    pub admin_email: Option<String>,
}

impl Notifications {
    pub fn new(public_url: impl Into<String>, admin_email: Option<String>) -> Self {
        Self {
            public_url: public_url.into().trim_end_matches('/').to_string(),
            admin_email,
        }
    }

    fn link(&self, path: &str) -> String {
        format!("{}{path}", self.public_url)
    }

    fn email(
        &self,
        to: &str,
        subject: String,
        message: String,
        button: &str,
        path: &str,
    ) -> EmailRequest {
        EmailRequest {
            to: to.to_string(),
            subject: subject.clone(),
            data: EmailTemplateData {
                title: subject,
                message,
                button: button.to_string(),
                link: self.link(path),
            },
        }
    }

    fn to_admin(&self, subject: String, message: String, path: &str) -> Option<EmailRequest> {
        let to = self.admin_email.as_deref()?;
        Some(self.email(to, subject, message, "Open admin panel", path))
    }

    pub fn registration_received(&self, user: &User) -> EmailRequest {
        self.email(
            &user.email,
            "We received your registration".into(),
            format!(
                "Dear Dr. {},\n\nThank you for registering. Our team verifies every medical \
                 license before granting access. You will receive another email once your \
                 account is approved.",
                user.last_name
            ),
            "Visit the store",
            "/",
        )
    }

    pub fn doctor_awaiting_approval(&self, user: &User) -> Option<EmailRequest> {
        self.to_admin(
            format!("New doctor awaiting approval: {}", user.full_name()),
            format!(
                "{} ({}) registered with license number {}.",
                user.full_name(),
                user.email,
                user.license_number
            ),
            &format!("/admin/doctors/{}", user.user_id),
        )
    }

    pub fn doctor_approved(&self, user: &User) -> EmailRequest {
        self.email(
            &user.email,
            "Your account has been approved".into(),
            format!(
                "Dear Dr. {},\n\nYour account is now active. You can sign in and place orders.",
                user.last_name
            ),
            "Sign in",
            "/login",
        )
    }

    pub fn order_placed(&self, user: &User, order: &Order, bank: &BankConfig) -> EmailRequest {
        let mut message = format!(
            "Thank you for your order {}.\nTotal: {}\nShipping to: {}\n",
            order.order_number,
            format_cents(order.total),
            order.shipping_address
        );

        if order.payment_method == PaymentMethod::BankTransfer.as_str() {
            message.push_str(&format!(
                "\nPlease pay by bank transfer:\nBank: {}\nAccount name: {}\nAccount number: {}\n",
                bank.bank_name, bank.account_name, bank.account_number
            ));
            if let Some(iban) = &bank.iban {
                message.push_str(&format!("IBAN: {iban}\n"));
            }
            if let Some(swift) = &bank.swift {
                message.push_str(&format!("SWIFT: {swift}\n"));
            }
            message.push_str(&format!(
                "Reference: {}\n{}",
                order.order_number, bank.instructions
            ));
        }

        self.email(
            &user.email,
            format!("Order {} received", order.order_number),
            message,
            "View order",
            &format!("/orders/{}", order.order_id),
        )
    }

    pub fn admin_new_order(&self, user: &User, order: &Order) -> Option<EmailRequest> {
        self.to_admin(
            format!("New order {}", order.order_number),
            format!(
                "{} placed order {} for {} ({}).",
                user.full_name(),
                order.order_number,
                format_cents(order.total),
                order.payment_method
            ),
            &format!("/admin/orders/{}", order.order_id),
        )
    }

    pub fn payment_submitted(&self, order: &Order) -> Option<EmailRequest> {
        self.to_admin(
            format!("Payment submitted for {}", order.order_number),
            format!(
                "The buyer reported a bank transfer with reference '{}'.",
                order.payment_reference.as_deref().unwrap_or_default()
            ),
            &format!("/admin/orders/{}", order.order_id),
        )
    }

    pub fn order_status_changed(
        &self,
        buyer_email: &str,
        order: &Order,
        status: OrderStatus,
    ) -> EmailRequest {
        let mut message = format!("Your order {} is now {}.", order.order_number, status);
        if let Some(reason) = order.decline_reason.as_deref() {
            message.push_str(&format!("\nReason: {reason}"));
        }

        self.email(
            buyer_email,
            format!("Order {} {}", order.order_number, status),
            message,
            "View order",
            &format!("/orders/{}", order.order_id),
        )
    }

    pub fn referral_invite(&self, referrer: &User, referral: &Referral) -> EmailRequest {
        let mut message = format!(
            "Hello {},\n\nDr. {} invited you to join the MedSupply marketplace for \
             medical professionals.",
            referral.referred_name,
            referrer.full_name()
        );
        if let Some(note) = referral.message.as_deref().filter(|m| !m.trim().is_empty()) {
            message.push_str(&format!("\n\nTheir message: {note}"));
        }

        self.email(
            &referral.referred_email,
            format!("Dr. {} invited you to MedSupply", referrer.last_name),
            message,
            "Create your account",
            "/register",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_render_with_two_decimals() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(1_299), "12.99");
        assert_eq!(format_cents(100_005), "1000.05");
        assert_eq!(format_cents(-50), "-0.50");
    }

    #[test]
    fn admin_mail_is_skipped_without_address() {
        let n = Notifications::new("https://shop.example/", None);
        let order = Order {
            order_id: 7,
            order_number: "MS-20250101-ABCDEF".into(),
            user_id: 1,
            status: "pending".into(),
            payment_method: "bank_transfer".into(),
            payment_reference: Some("TRX1".into()),
            payment_submitted_at: None,
            total: 1_000,
            shipping_address: "Somewhere 1".into(),
            notes: None,
            decline_reason: None,
            created_at: None,
            updated_at: None,
        };
        assert!(n.payment_submitted(&order).is_none());

        let n = Notifications::new("https://shop.example/", Some("ops@shop.example".into()));
        let mail = n.payment_submitted(&order).unwrap();
        assert_eq!(mail.to, "ops@shop.example");
        assert_eq!(mail.data.link, "https://shop.example/admin/orders/7");
    }
}
