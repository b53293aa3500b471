use anyhow::{bail, Context};
use mailform_config::Config;
use mailform_core_contact_contracts::{ContactFormService, ContactSubmitError, DeliveryOutcome};
use mailform_models::contact::ContactField;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};

use crate::{
    environment::{types::ContactForm, Environment},
    render::{field_error, with_notifications},
};

/// Ask for every field on the terminal and submit the form once all of them
/// are valid.
pub async fn form(config: Config) -> anyhow::Result<()> {
    let env = Environment::new(&config)?;
    let mut prompt = Prompt {
        lines: BufReader::new(tokio::io::stdin()).lines(),
        out: tokio::io::stdout(),
    };

    loop {
        for field in ContactField::ALL {
            prompt.field(&env.form, field).await?;
        }

        match with_notifications(env.notify.subscribe(), env.form.submit()).await {
            Ok(DeliveryOutcome::Sent) => return Ok(()),
            Ok(DeliveryOutcome::Failed) => {
                if !prompt.confirm("Try again?").await? {
                    bail!("Failed to send message");
                }
            }
            Err(ContactSubmitError::Invalid(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }
}

struct Prompt<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Prompt<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Keep asking until the field holds a valid value. Fields that are
    /// already valid (e.g. kept after a failed delivery) are skipped.
    async fn field(&mut self, form: &ContactForm, field: ContactField) -> anyhow::Result<()> {
        let state = form.state();
        if !state.values.get(field).is_empty() && state.values.validate_field(field).is_ok() {
            return Ok(());
        }

        loop {
            let value = self.ask(field.label()).await?;
            form.set_value(field, value);
            form.blur(field);

            match field_error(&form.state(), field) {
                Some(error) => self.write_line(&error).await?,
                None => return Ok(()),
            }
        }
    }

    async fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        let answer = self.ask(&format!("{question} [y/N]")).await?;
        Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    async fn ask(&mut self, label: &str) -> anyhow::Result<String> {
        self.out.write_all(format!("{label}: ").as_bytes()).await?;
        self.out.flush().await?;

        self.lines
            .next_line()
            .await
            .context("Failed to read from stdin")?
            .context("Unexpected end of input")
    }

    async fn write_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.out.write_all(line.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await.map_err(Into::into)
    }
}
