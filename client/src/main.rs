//! Terminal entry-point: wires the session store, navigator, and gateway,
//! then drives the portal's views from a small command loop.

use std::io::{self, BufRead, Write as _};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::eyre;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use client::config::AppConfig;
use client::dates::{format_date, time_ago_from_now};
use client::domain::ports::PortalApi;
use client::domain::{
    LinkableItems, LoginCredentials, Navigator, RouteTable, SessionStore, SupportForm, TraceId,
    ViewName,
};
use client::domain::session::AuthenticatedUser;
use client::models::{ClaimStatus, ClaimStatusUpdate, NewClaim, TicketStatus, TicketUpdate};
use client::outbound::{FileSessionVault, HttpPortalApi};

/// Application bootstrap.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::parse();
    let vault = Arc::new(FileSessionVault::new(&config.session_file));
    let session = Arc::new(SessionStore::restore(vault));
    let navigator = Arc::new(Navigator::new(
        RouteTable::standard(),
        Arc::clone(&session),
    ));
    let api = Arc::new(
        HttpPortalApi::new(
            config.api_url.clone(),
            config.timeout(),
            Arc::clone(&session),
            Arc::clone(&navigator),
        )
        .map_err(|error| eyre!("cannot build portal gateway: {error}"))?,
    );

    let shell = Shell {
        session,
        navigator,
        api,
    };
    shell.run().await
}

struct Shell {
    session: Arc<SessionStore>,
    navigator: Arc<Navigator>,
    api: Arc<HttpPortalApi>,
}

impl Shell {
    async fn run(&self) -> color_eyre::Result<()> {
        println!("Coverdesk portal. Type 'help' for commands.");
        self.render(self.navigator.current_view()).await;

        let stdin = io::stdin();
        loop {
            print!("[{}]> ", self.navigator.current_view());
            io::stdout().flush()?;

            let Some(line) = stdin.lock().lines().next() else {
                break;
            };
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed == "quit" || trimmed == "exit" {
                break;
            }

            let trace_id = TraceId::generate();
            TraceId::scope(trace_id, self.dispatch(trimmed)).await;
        }
        Ok(())
    }

    async fn dispatch(&self, line: &str) {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return;
        };
        let rest: Vec<&str> = parts.collect();

        match command {
            "help" => print_help(),
            "go" => match rest.first() {
                Some(path) => {
                    let requested = (*path).to_owned();
                    let arrived = self.navigator.navigate(&requested);
                    if self.navigator.current_path() != requested {
                        println!("redirected to {arrived}");
                    }
                    self.render(arrived).await;
                }
                None => println!("usage: go <path>"),
            },
            "login" => self.login(&rest).await,
            "register" => self.register(&rest).await,
            "logout" => {
                self.session.logout();
                println!("logged out");
            }
            "whoami" => match self.session.current_user() {
                Some(user) => println!("user #{} ({})", user.id, user.role),
                None if self.session.is_logged_in() => {
                    println!("session restored; log in again to refresh your role");
                }
                None => println!("not logged in"),
            },
            "policy" => self.show_policy(&rest).await,
            "buy" => self.buy(&rest).await,
            "renew" => self.renew(&rest).await,
            "claim" => self.submit_claim(&rest).await,
            "review" => self.review_claim(&rest).await,
            "ticket" => self.submit_ticket(line).await,
            "answer" => self.answer_ticket(&rest).await,
            other => println!("unknown command '{other}'; type 'help'"),
        }
    }

    async fn login(&self, args: &[&str]) {
        let (Some(email), Some(password)) = (args.first(), args.get(1)) else {
            println!("usage: login <email> <password>");
            return;
        };
        let credentials = match LoginCredentials::try_from_parts(email, password) {
            Ok(credentials) => credentials,
            Err(error) => {
                println!("invalid credentials: {error}");
                return;
            }
        };
        match self.api.login(&credentials).await {
            Ok(auth) => {
                let user = AuthenticatedUser {
                    id: auth.user.id,
                    role: auth.user.role,
                };
                self.session.login(auth.token, user);
                println!("welcome back, {}", auth.user.name);
                if let Some(intended) = self.session.take_intended() {
                    let arrived = self.navigator.navigate(&intended);
                    println!("resuming {intended}");
                    self.render(arrived).await;
                }
            }
            Err(error) => println!("login failed: {}", error.surface_message("Login failed.")),
        }
    }

    async fn register(&self, args: &[&str]) {
        let (Some(name), Some(email), Some(password), Some(phone)) =
            (args.first(), args.get(1), args.get(2), args.get(3))
        else {
            println!("usage: register <name> <email> <password> <phone> <address...>");
            return;
        };
        let registration = client::models::Registration {
            name: (*name).to_owned(),
            email: (*email).to_owned(),
            password: (*password).to_owned(),
            phone: (*phone).to_owned(),
            address: args.get(4..).unwrap_or_default().join(" "),
        };
        match self.api.register(&registration).await {
            Ok(user) => println!("account created for {}; log in to continue", user.email),
            Err(error) => println!("{}", error.surface_message("Registration failed.")),
        }
    }

    async fn show_policy(&self, args: &[&str]) {
        let Some(policy_id) = args.first().and_then(|raw| raw.parse::<i64>().ok()) else {
            println!("usage: policy <policy-id>");
            return;
        };
        match self.api.fetch_policy(policy_id).await {
            Ok(policy) => {
                println!("#{} {}", policy.id, policy.name);
                println!("{}", policy.description);
                println!(
                    "premium {:.2}, cover {:.2}, {} months, renewal rate {:.2}",
                    policy.premium_amount,
                    policy.coverage_amount,
                    policy.duration_months,
                    policy.renewal_premium_rate
                );
            }
            Err(error) => println!("{}", error.surface_message("Could not load that policy.")),
        }
    }

    async fn buy(&self, args: &[&str]) {
        let Some(policy_id) = args.first().and_then(|raw| raw.parse::<i64>().ok()) else {
            println!("usage: buy <policy-id>");
            return;
        };
        match self.api.purchase_policy(policy_id).await {
            Ok(purchase) => println!(
                "purchased '{}' through {}",
                purchase.policy.name,
                format_date(&purchase.end_date)
            ),
            Err(error) => println!("{}", error.surface_message("Purchase failed.")),
        }
    }

    async fn renew(&self, args: &[&str]) {
        let Some(policy_id) = args.first().and_then(|raw| raw.parse::<i64>().ok()) else {
            println!("usage: renew <policy-id>");
            return;
        };
        match self.api.renew_policy(policy_id).await {
            Ok(renewed) => println!(
                "renewed '{}' through {}",
                renewed.policy.name,
                format_date(&renewed.end_date)
            ),
            Err(error) => println!("{}", error.surface_message("Renewal failed.")),
        }
    }

    async fn submit_claim(&self, args: &[&str]) {
        let (Some(user_policy_id), Some(amount)) = (
            args.first().and_then(|raw| raw.parse::<i64>().ok()),
            args.get(1).and_then(|raw| raw.parse::<f64>().ok()),
        ) else {
            println!("usage: claim <user-policy-id> <amount> <reason...>");
            return;
        };
        let reason = args.get(2..).unwrap_or_default().join(" ");
        if reason.is_empty() {
            println!("usage: claim <user-policy-id> <amount> <reason...>");
            return;
        }
        let claim = NewClaim {
            user_policy_id,
            claim_amount: amount,
            reason,
        };
        match self.api.submit_claim(&claim).await {
            Ok(submitted) => println!("claim #{} lodged ({:?})", submitted.id, submitted.status),
            Err(error) => println!("{}", error.surface_message("Claim submission failed.")),
        }
    }

    async fn review_claim(&self, args: &[&str]) {
        let (Some(claim_id), Some(verdict)) = (
            args.first().and_then(|raw| raw.parse::<i64>().ok()),
            args.get(1),
        ) else {
            println!("usage: review <claim-id> APPROVED|REJECTED <comment...>");
            return;
        };
        let status = match *verdict {
            "APPROVED" => ClaimStatus::Approved,
            "REJECTED" => ClaimStatus::Rejected,
            _ => {
                println!("verdict must be APPROVED or REJECTED");
                return;
            }
        };
        let update = ClaimStatusUpdate {
            status,
            reviewer_comment: args.get(2..).unwrap_or_default().join(" "),
        };
        match self.api.update_claim_status(claim_id, &update).await {
            Ok(claim) => println!("claim #{} is now {:?}", claim.id, claim.status),
            Err(error) => println!("{}", error.surface_message("Claim update failed.")),
        }
    }

    /// `ticket <subject> | <description>` raises a ticket from the support
    /// view, linking nothing.
    async fn submit_ticket(&self, line: &str) {
        if self.navigator.current_view() != ViewName::Support {
            println!("go /support first");
            return;
        }
        let rest = line.strip_prefix("ticket").unwrap_or(line).trim();
        let Some((subject, description)) = rest.split_once('|') else {
            println!("usage: ticket <subject> | <description>");
            return;
        };

        let mut form = SupportForm::new(Arc::clone(&self.api));
        form.set_subject(subject.trim());
        form.set_description(description.trim());
        let draft = form.draft_with(None, None);
        form.submit(&draft).await;
        if let Some(success) = form.success() {
            println!("{success}");
        }
        if let Some(error) = form.error() {
            println!("{error}");
        }
    }

    async fn answer_ticket(&self, args: &[&str]) {
        let (Some(ticket_id), Some(state)) = (
            args.first().and_then(|raw| raw.parse::<i64>().ok()),
            args.get(1),
        ) else {
            println!("usage: answer <ticket-id> RESOLVED|CLOSED <response...>");
            return;
        };
        let status = match *state {
            "RESOLVED" => TicketStatus::Resolved,
            "CLOSED" => TicketStatus::Closed,
            _ => {
                println!("state must be RESOLVED or CLOSED");
                return;
            }
        };
        let update = TicketUpdate {
            response: args.get(2..).unwrap_or_default().join(" "),
            status,
        };
        match self.api.update_ticket(ticket_id, &update).await {
            Ok(ticket) => println!("ticket #{} is now {:?}", ticket.id, ticket.status),
            Err(error) => println!("{}", error.surface_message("Ticket update failed.")),
        }
    }

    /// Load and print whatever the arrived view shows, the way the original
    /// pages fetched on mount.
    async fn render(&self, view: ViewName) {
        match view {
            ViewName::Home => println!("Welcome to Coverdesk."),
            ViewName::Login => println!("log in with: login <email> <password>"),
            ViewName::Register => {
                println!("register with: register <name> <email> <password> <phone> <address...>");
            }
            ViewName::PolicyCatalog => match self.api.fetch_policy_catalog().await {
                Ok(policies) => {
                    for policy in policies {
                        println!(
                            "#{} {} - premium {:.2}, cover {:.2}, {} months",
                            policy.id,
                            policy.name,
                            policy.premium_amount,
                            policy.coverage_amount,
                            policy.duration_months
                        );
                    }
                    println!("buy with: buy <policy-id>");
                }
                Err(error) => println!("{}", error.surface_message("Could not load policies.")),
            },
            ViewName::Support => {
                let mut items = LinkableItems::new(Arc::clone(&self.api));
                items.fetch_all_user_data().await;
                if items.fetch_failed() {
                    println!("linkable items unavailable right now");
                } else {
                    println!(
                        "{} policies and {} claims available to link",
                        items.user_policies().len(),
                        items.user_claims().len()
                    );
                }
                println!("raise a ticket with: ticket <subject> | <description>");
            }
            ViewName::MyPolicies => match self.api.fetch_user_policies().await {
                Ok(purchases) => {
                    for purchase in purchases {
                        println!(
                            "#{} {} - {:?}, ends {}",
                            purchase.id,
                            purchase.policy.name,
                            purchase.status,
                            format_date(&purchase.end_date)
                        );
                    }
                }
                Err(error) => println!("{}", error.surface_message("Could not load your policies.")),
            },
            ViewName::SubmitClaim => {
                println!("lodge a claim with: claim <user-policy-id> <amount> <reason...>");
            }
            ViewName::ClaimList => match self.api.fetch_user_claims().await {
                Ok(claims) => {
                    for claim in claims {
                        println!(
                            "#{} {:.2} - {:?} ({})",
                            claim.id,
                            claim.claim_amount,
                            claim.status,
                            time_ago_from_now(&claim.claim_date)
                        );
                    }
                }
                Err(error) => println!("{}", error.surface_message("Could not load your claims.")),
            },
            ViewName::AdminClaims => match self.api.fetch_all_claims().await {
                Ok(claims) => {
                    for claim in claims {
                        println!(
                            "#{} {:.2} - {:?}: {}",
                            claim.id, claim.claim_amount, claim.status, claim.reason
                        );
                    }
                    println!("review with: review <claim-id> APPROVED|REJECTED <comment...>");
                }
                Err(error) => println!("{}", error.surface_message("Could not load claims.")),
            },
            ViewName::PolicyRenewList => match self.api.fetch_renewable_policies().await {
                Ok(renewables) => {
                    for renewable in renewables {
                        println!(
                            "#{} {} - ends {}, renew for {:.2}",
                            renewable.user_policy_id,
                            renewable.policy_name,
                            format_date(&renewable.end_date),
                            renewable.renewal_rate
                        );
                    }
                }
                Err(error) => {
                    println!("{}", error.surface_message("Could not load renewable policies."));
                }
            },
            ViewName::RenewPolicy => println!("renew with: renew <policy-id>"),
            ViewName::MyTickets => match self.api.fetch_user_tickets().await {
                Ok(tickets) => {
                    for ticket in tickets {
                        println!(
                            "#{} {} - {:?} ({})",
                            ticket.id,
                            ticket.subject,
                            ticket.status,
                            time_ago_from_now(&ticket.created_at)
                        );
                    }
                }
                Err(error) => println!("{}", error.surface_message("Could not load your tickets.")),
            },
            ViewName::AdminTickets => match self.api.fetch_all_tickets().await {
                Ok(tickets) => {
                    for ticket in tickets {
                        let reporter = ticket.user_full_name.unwrap_or_default();
                        println!(
                            "#{} {} - {:?} from {}",
                            ticket.id, ticket.subject, ticket.status, reporter
                        );
                    }
                    println!("answer with: answer <ticket-id> RESOLVED|CLOSED <response...>");
                }
                Err(error) => println!("{}", error.surface_message("Could not load tickets.")),
            },
            ViewName::Unauthorized => println!("you do not have access to that page"),
            ViewName::NotFound => println!("page not found"),
        }
    }
}

fn print_help() {
    println!(
        "commands:\n  \
         go <path>                                 navigate (see routes below)\n  \
         login <email> <password>                  authenticate\n  \
         register <name> <email> <pw> <phone> <addr>  create an account\n  \
         logout                                    clear the session\n  \
         whoami                                    show the current identity\n  \
         policy <policy-id>                        show one catalogue policy\n  \
         buy <policy-id>                           purchase from the catalogue\n  \
         renew <policy-id>                         renew a policy\n  \
         claim <user-policy-id> <amount> <reason>  lodge a claim\n  \
         review <claim-id> <verdict> <comment>     admin claim review\n  \
         ticket <subject> | <description>          raise a support ticket\n  \
         answer <ticket-id> <state> <response>     admin ticket answer\n  \
         quit\n\
         routes: / /login /register /policies /support /my-policies /submit-claim\n\
         /claims /admin/claims /policy-renew /renew-policy /support/user /support/admin"
    );
}
