use anyhow::Context as _;
use organizer_core::CollectionView;
use organizer_core::MutationGateway;
use organizer_core::gateway::RemoveOutcome;
use organizer_core::ordering::DisplayOrder;
use organizer_core::predicate::Filterable;
use organizer_core::predicate::TaskStatus;
use organizer_core::predicate::TimeFilter;
use organizer_core::types::Appointment;
use organizer_core::types::AppointmentCategory;
use organizer_core::types::Contact;
use organizer_core::types::ContactCategory;
use organizer_core::types::Priority;
use organizer_core::types::Record;
use organizer_core::types::Stock;
use organizer_core::types::Task;
use organizer_core::types::Website;
use organizer_core::validate::AppointmentInput;
use organizer_core::validate::ContactInput;
use organizer_core::validate::StockInput;
use organizer_core::validate::TaskInput;
use organizer_core::validate::WebsiteInput;
use tracing::debug;

use crate::Session;
use crate::render;

#[derive(Debug, clap::Subcommand)]
pub enum ContactsCommand {
    /// List contacts in stored order.
    List {
        /// Case-insensitive match on name, phone or email.
        #[arg(long, group = "filter")]
        search: Option<String>,
        #[arg(long, group = "filter")]
        category: Option<ContactCategory>,
        #[arg(long)]
        json: bool,
    },
    /// Add a contact.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value_t = ContactCategory::General)]
        category: ContactCategory,
    },
    /// Edit an existing contact; omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        category: Option<ContactCategory>,
    },
    /// Remove a contact by id.
    Rm { id: String },
}

#[derive(Debug, clap::Subcommand)]
pub enum AppointmentsCommand {
    /// List appointments, upcoming first.
    List {
        /// Case-insensitive match on title, description, location or category.
        #[arg(long, group = "filter")]
        search: Option<String>,
        #[arg(long, group = "filter")]
        upcoming: bool,
        #[arg(long, group = "filter")]
        past: bool,
        #[arg(long, group = "filter")]
        category: Option<AppointmentCategory>,
        #[arg(long)]
        json: bool,
    },
    /// Schedule an appointment.
    Add {
        #[arg(long)]
        title: String,
        /// `YYYY-MM-DD`
        #[arg(long)]
        date: String,
        /// `HH:MM`
        #[arg(long)]
        time: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value_t = AppointmentCategory::General)]
        category: AppointmentCategory,
    },
    /// Edit an existing appointment; omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        category: Option<AppointmentCategory>,
    },
    /// Remove an appointment by id.
    Rm { id: String },
    /// Mark an appointment's reminder as sent.
    Remind { id: String },
}

#[derive(Debug, clap::Subcommand)]
pub enum TasksCommand {
    /// List tasks: pending first, then by priority and due date.
    List {
        /// Case-insensitive match on title or description.
        #[arg(long, group = "filter")]
        search: Option<String>,
        #[arg(long, group = "filter")]
        completed: bool,
        #[arg(long, group = "filter")]
        pending: bool,
        #[arg(long)]
        json: bool,
    },
    /// Add a task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// `YYYY-MM-DD`
        #[arg(long, default_value = "")]
        due: String,
        #[arg(long, default_value_t = Priority::Medium)]
        priority: Priority,
    },
    /// Edit an existing task; omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// `YYYY-MM-DD`, or an empty string to clear it.
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Remove a task by id.
    Rm { id: String },
    /// Flip a task between pending and completed.
    Toggle { id: String },
}

#[derive(Debug, clap::Subcommand)]
pub enum StocksCommand {
    /// List holdings in stored order.
    List {
        /// Case-insensitive match on symbol or name.
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Add a holding.
    Add {
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        purchase_price: String,
        #[arg(long)]
        current_price: String,
    },
    /// Edit an existing holding; omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        purchase_price: Option<String>,
        #[arg(long)]
        current_price: Option<String>,
    },
    /// Remove a holding by id.
    Rm { id: String },
}

#[derive(Debug, clap::Subcommand)]
pub enum WebsitesCommand {
    /// List websites in stored order.
    List {
        /// Case-insensitive match on name, url, category or description.
        #[arg(long, group = "filter")]
        search: Option<String>,
        #[arg(long, group = "filter")]
        category: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Bookmark a website.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit an existing website; omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a website by id.
    Rm { id: String },
}

fn print_list<R>(
    session: &Session,
    view: &CollectionView<R>,
    json: bool,
    line: impl Fn(&R) -> String,
) -> anyhow::Result<()>
where
    R: Filterable + DisplayOrder,
{
    let items = view.items(session.now())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("No {} found.", R::KIND.storage_key());
    } else {
        for item in &items {
            println!("{}", line(item));
        }
    }
    Ok(())
}

/// Look up the edit target; a missing id is an error here.
fn edit_target<R: Record>(gw: &MutationGateway<R>, id: &str) -> anyhow::Result<R> {
    gw.get(id)?
        .with_context(|| format!("{} not found: {id}", R::KIND.label()))
}

fn save<R: Record>(session: &Session, gw: &mut MutationGateway<R>, record: R) -> anyhow::Result<()> {
    let saved = gw.save(record, session.now())?;
    report(session, gw);
    println!("{}", saved.record().id());
    Ok(())
}

/// Removing an unknown id is a silent no-op.
fn remove<R: Record>(session: &Session, id: &str) -> anyhow::Result<()> {
    let mut gw = session.gateway::<R>();
    match gw.remove(id, session.now())? {
        RemoveOutcome::Removed => report(session, &gw),
        RemoveOutcome::NotFound => debug!("{}: no record with id {id}", R::KIND.storage_key()),
    }
    Ok(())
}

fn report<R: Record>(session: &Session, gw: &MutationGateway<R>) {
    if let Some(notice) = gw.status(session.now()) {
        println!("{}", notice.message);
    }
}

pub(crate) fn contacts(session: &Session, cmd: ContactsCommand) -> anyhow::Result<()> {
    match cmd {
        ContactsCommand::List {
            search,
            category,
            json,
        } => {
            let mut view = CollectionView::new(session.store::<Contact>());
            if let Some(query) = search {
                view.search(query);
            } else if let Some(category) = category {
                view.filter_category(category);
            }
            print_list(session, &view, json, render::contact)
        }
        ContactsCommand::Add {
            name,
            phone,
            email,
            category,
        } => {
            let record = ContactInput {
                name,
                phone,
                email,
                category,
            }
            .into_record(None)?;
            save(session, &mut session.gateway(), record)
        }
        ContactsCommand::Edit {
            id,
            name,
            phone,
            email,
            category,
        } => {
            let mut gw = session.gateway::<Contact>();
            let existing = edit_target(&gw, &id)?;
            let mut input = ContactInput::from_record(&existing);
            if let Some(v) = name {
                input.name = v;
            }
            if let Some(v) = phone {
                input.phone = v;
            }
            if let Some(v) = email {
                input.email = v;
            }
            if let Some(v) = category {
                input.category = v;
            }
            let record = input.into_record(Some(&existing))?;
            save(session, &mut gw, record)
        }
        ContactsCommand::Rm { id } => remove::<Contact>(session, &id),
    }
}

pub(crate) fn appointments(session: &Session, cmd: AppointmentsCommand) -> anyhow::Result<()> {
    let now = session.now();
    match cmd {
        AppointmentsCommand::List {
            search,
            upcoming,
            past,
            category,
            json,
        } => {
            let mut view = CollectionView::new(session.store::<Appointment>());
            if let Some(query) = search {
                view.search(query);
            } else if upcoming {
                view.filter_status(TimeFilter::Upcoming);
            } else if past {
                view.filter_status(TimeFilter::Past);
            } else if let Some(category) = category {
                view.filter_category(category);
            }
            print_list(session, &view, json, |a| render::appointment(a, now))
        }
        AppointmentsCommand::Add {
            title,
            date,
            time,
            description,
            location,
            category,
        } => {
            let record = AppointmentInput {
                title,
                description,
                date,
                time,
                location,
                category,
            }
            .into_record(None, now)?;
            save(session, &mut session.gateway(), record)
        }
        AppointmentsCommand::Edit {
            id,
            title,
            date,
            time,
            description,
            location,
            category,
        } => {
            let mut gw = session.gateway::<Appointment>();
            let existing = edit_target(&gw, &id)?;
            let mut input = AppointmentInput::from_record(&existing);
            if let Some(v) = title {
                input.title = v;
            }
            if let Some(v) = date {
                input.date = v;
            }
            if let Some(v) = time {
                input.time = v;
            }
            if let Some(v) = description {
                input.description = v;
            }
            if let Some(v) = location {
                input.location = v;
            }
            if let Some(v) = category {
                input.category = v;
            }
            let record = input.into_record(Some(&existing), now)?;
            save(session, &mut gw, record)
        }
        AppointmentsCommand::Rm { id } => remove::<Appointment>(session, &id),
        AppointmentsCommand::Remind { id } => {
            let mut gw = session.gateway::<Appointment>();
            if !gw.mark_reminder_sent(&id)? {
                anyhow::bail!("Appointment not found: {id}");
            }
            println!("Reminder marked as sent");
            Ok(())
        }
    }
}

pub(crate) fn tasks(session: &Session, cmd: TasksCommand) -> anyhow::Result<()> {
    match cmd {
        TasksCommand::List {
            search,
            completed,
            pending,
            json,
        } => {
            let mut view = CollectionView::new(session.store::<Task>());
            if let Some(query) = search {
                view.search(query);
            } else if completed {
                view.filter_status(TaskStatus::Completed);
            } else if pending {
                view.filter_status(TaskStatus::Pending);
            }
            print_list(session, &view, json, render::task)
        }
        TasksCommand::Add {
            title,
            description,
            due,
            priority,
        } => {
            let record = TaskInput {
                title,
                description,
                due_date: due,
                priority,
            }
            .into_record(None)?;
            save(session, &mut session.gateway(), record)
        }
        TasksCommand::Edit {
            id,
            title,
            description,
            due,
            priority,
        } => {
            let mut gw = session.gateway::<Task>();
            let existing = edit_target(&gw, &id)?;
            let mut input = TaskInput::from_record(&existing);
            if let Some(v) = title {
                input.title = v;
            }
            if let Some(v) = description {
                input.description = v;
            }
            if let Some(v) = due {
                input.due_date = v;
            }
            if let Some(v) = priority {
                input.priority = v;
            }
            let record = input.into_record(Some(&existing))?;
            save(session, &mut gw, record)
        }
        TasksCommand::Rm { id } => remove::<Task>(session, &id),
        TasksCommand::Toggle { id } => {
            let mut gw = session.gateway::<Task>();
            match gw.toggle_status(&id)? {
                Some(task) => println!("{}", render::task(&task)),
                None => debug!("tasks: no record with id {id}"),
            }
            Ok(())
        }
    }
}

pub(crate) fn stocks(session: &Session, cmd: StocksCommand) -> anyhow::Result<()> {
    match cmd {
        StocksCommand::List { search, json } => {
            let mut view = CollectionView::new(session.store::<Stock>());
            if let Some(query) = search {
                view.search(query);
            }
            print_list(session, &view, json, render::stock)
        }
        StocksCommand::Add {
            symbol,
            name,
            quantity,
            purchase_price,
            current_price,
        } => {
            let record = StockInput {
                symbol,
                name,
                quantity,
                purchase_price,
                current_price,
            }
            .into_record(None)?;
            save(session, &mut session.gateway(), record)
        }
        StocksCommand::Edit {
            id,
            symbol,
            name,
            quantity,
            purchase_price,
            current_price,
        } => {
            let mut gw = session.gateway::<Stock>();
            let existing = edit_target(&gw, &id)?;
            let mut input = StockInput::from_record(&existing);
            if let Some(v) = symbol {
                input.symbol = v;
            }
            if let Some(v) = name {
                input.name = v;
            }
            if let Some(v) = quantity {
                input.quantity = v;
            }
            if let Some(v) = purchase_price {
                input.purchase_price = v;
            }
            if let Some(v) = current_price {
                input.current_price = v;
            }
            let record = input.into_record(Some(&existing))?;
            save(session, &mut gw, record)
        }
        StocksCommand::Rm { id } => remove::<Stock>(session, &id),
    }
}

pub(crate) fn websites(session: &Session, cmd: WebsitesCommand) -> anyhow::Result<()> {
    match cmd {
        WebsitesCommand::List {
            search,
            category,
            json,
        } => {
            let mut view = CollectionView::new(session.store::<Website>());
            if let Some(query) = search {
                view.search(query);
            } else if let Some(category) = category {
                view.filter_category(category);
            }
            print_list(session, &view, json, render::website)
        }
        WebsitesCommand::Add {
            name,
            url,
            category,
            description,
        } => {
            let record = WebsiteInput {
                name,
                url,
                category,
                description,
            }
            .into_record(None)?;
            save(session, &mut session.gateway(), record)
        }
        WebsitesCommand::Edit {
            id,
            name,
            url,
            category,
            description,
        } => {
            let mut gw = session.gateway::<Website>();
            let existing = edit_target(&gw, &id)?;
            let mut input = WebsiteInput::from_record(&existing);
            if let Some(v) = name {
                input.name = v;
            }
            if let Some(v) = url {
                input.url = v;
            }
            if let Some(v) = category {
                input.category = v;
            }
            if let Some(v) = description {
                input.description = v;
            }
            let record = input.into_record(Some(&existing))?;
            save(session, &mut gw, record)
        }
        WebsitesCommand::Rm { id } => remove::<Website>(session, &id),
    }
}
