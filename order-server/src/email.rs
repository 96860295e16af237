//! Transactional email delivery (SES)

use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub async fn send_verification_code(
    ses: &SesClient,
    from: &str,
    to: &str,
    code: &str,
) -> Result<(), BoxError> {
    let subject = Content::builder()
        .data("認証コード / Your verification code")
        .build()?;

    let body_text = format!(
        "認証コード: {code}\n\
         有効期限は5分です。\n\n\
         Your verification code is: {code}\n\
         Valid for 5 minutes."
    );

    send(ses, from, to, subject, body_text).await?;
    tracing::info!(to = to, "Verification code sent");
    Ok(())
}

pub async fn send_subscription_activated(
    ses: &SesClient,
    from: &str,
    to: &str,
    plan: &str,
) -> Result<(), BoxError> {
    let subject = Content::builder()
        .data("プラン有効化のお知らせ / Subscription activated")
        .build()?;

    let body_text = format!(
        "「{plan}」プランが有効になりました。\n\
         ご利用ありがとうございます。\n\n\
         Your \"{plan}\" subscription has been activated.\n\
         Thank you for subscribing."
    );

    send(ses, from, to, subject, body_text).await?;
    tracing::info!(to = to, plan = plan, "Subscription activated email sent");
    Ok(())
}

pub async fn send_subscription_canceled(
    ses: &SesClient,
    from: &str,
    to: &str,
) -> Result<(), BoxError> {
    let subject = Content::builder()
        .data("プラン解約のお知らせ / Subscription canceled")
        .build()?;

    let body_text = "プランを解約しました。\n\
         いつでも再度お申し込みいただけます。\n\n\
         Your subscription has been canceled.\n\
         You can resubscribe at any time."
        .to_string();

    send(ses, from, to, subject, body_text).await?;
    tracing::info!(to = to, "Subscription canceled email sent");
    Ok(())
}

pub async fn send_payment_failed(
    ses: &SesClient,
    from: &str,
    to: &str,
) -> Result<(), BoxError> {
    let subject = Content::builder()
        .data("お支払いに失敗しました / Payment failed")
        .build()?;

    let body_text = "お支払いの処理ができませんでした。\n\
         お支払い方法をご確認ください。\n\n\
         We were unable to process your payment.\n\
         Please check your payment method."
        .to_string();

    send(ses, from, to, subject, body_text).await?;
    tracing::info!(to = to, "Payment failed email sent");
    Ok(())
}

async fn send(
    ses: &SesClient,
    from: &str,
    to: &str,
    subject: Content,
    body_text: String,
) -> Result<(), BoxError> {
    let body = Body::builder()
        .text(Content::builder().data(body_text).build()?)
        .build();

    let message = Message::builder().subject(subject).body(body).build();

    ses.send_email()
        .from_email_address(from)
        .destination(Destination::builder().to_addresses(to).build())
        .content(EmailContent::builder().simple(message).build())
        .send()
        .await?;
    Ok(())
}
