use chem_domain::DescriptionSource;
use chem_workflow::{DescriptionOutcome, DescriptionText, Notification, SearchOutcome, ViewRecord, WorkflowError};
use chemlens::render::{description_heading, plain_math, render_notification, render_record};
use chemlens::{init_logging, App, AppError};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::broadcast;

type Input = Lines<BufReader<Stdin>>;

/// Menú interactivo sobre el modelo de vista.
///
/// Opciones soportadas:
/// 1) Buscar compuesto (Enter repite la última búsqueda)
/// 2) Ver descripción de la base de datos
/// 3) Ver descripción generada
/// 4) Regenerar descripción
/// 5) Guardar credencial de generación
/// 6) Ver historial
/// 7) Borrar historial
/// 8) Cambiar tema
/// 9) Guardar imagen 2D
/// 10) Exportar la vista actual como JSON
/// 0) Salir
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    init_logging();
    let app = App::from_env()?;
    let vm = &app.view_model;
    let mut notices = vm.subscribe_notifications();
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut theme = vm.theme()?;
    let mut last_query = vm.last_query()?;

    loop {
        println!("\n== ChemLens (tema {}) ==", theme);
        println!("1) Buscar compuesto");
        println!("2) Ver descripción de la base de datos");
        println!("3) Ver descripción generada");
        println!("4) Regenerar descripción");
        println!("5) Guardar credencial de generación");
        println!("6) Ver historial");
        println!("7) Borrar historial");
        println!("8) Cambiar tema");
        println!("9) Guardar imagen 2D");
        println!("10) Exportar vista como JSON");
        println!("0) Salir");
        let choice = match prompt(&mut input, "Elige una opción: ").await? {
            Some(c) => c,
            None => break,
        };

        match choice.trim() {
            "1" => {
                let hint = last_query.as_deref().map(|q| format!(" [{}]", q)).unwrap_or_default();
                let raw = prompt(&mut input, &format!("Nombre del compuesto{}: ", hint)).await?
                                                                                          .unwrap_or_default();
                let query = if raw.trim().is_empty() { last_query.clone().unwrap_or_default() } else { raw };
                match vm.search(&query).await {
                    Ok(SearchOutcome::Published(record)) => {
                        last_query = Some(query.trim().to_string());
                        show_record(&app, &record, theme).await;
                    }
                    Ok(SearchOutcome::Ignored) => println!("Búsqueda vacía."),
                    Ok(SearchOutcome::Superseded) => {}
                    // Ya notificado.
                    Err(WorkflowError::NotFound(_)) => {}
                    Err(e) => eprintln!("Error en la búsqueda: {}", e),
                }
            }
            "2" => match vm.select_source(DescriptionSource::Database) {
                Ok(Some(record)) => show_description(&app, &record, theme).await,
                Ok(None) => println!("Primero busca un compuesto."),
                Err(e) => eprintln!("Error: {}", e),
            },
            "3" => {
                let outcome = vm.request_generated().await;
                if let Ok(DescriptionOutcome::CredentialRequired) = outcome {
                    drain_notices(&mut notices);
                    let raw = prompt(&mut input, "Credencial: ").await?.unwrap_or_default();
                    let saved = vm.save_credential(&raw).await;
                    after_description(&app, saved, theme).await;
                } else {
                    after_description(&app, outcome, theme).await;
                }
            }
            "4" => {
                let outcome = vm.regenerate().await;
                after_description(&app, outcome, theme).await;
            }
            "5" => {
                let raw = prompt(&mut input, "Credencial: ").await?.unwrap_or_default();
                let saved = vm.save_credential(&raw).await;
                after_description(&app, saved, theme).await;
            }
            "6" => match vm.history() {
                Ok(history) => {
                    if history.is_empty() {
                        println!("Historial vacío.");
                    }
                    for (i, entry) in history.entries().iter().enumerate() {
                        println!("{:>2}. {}", i + 1, entry);
                    }
                }
                Err(e) => eprintln!("Error: {}", e),
            },
            "7" => {
                if let Err(e) = vm.clear_history() {
                    eprintln!("Error: {}", e);
                }
            }
            "8" => match vm.toggle_theme() {
                Ok(next) => theme = next,
                Err(e) => eprintln!("Error: {}", e),
            },
            "9" => match vm.download_image().await {
                Ok(Some((file, bytes))) => match tokio::fs::write(&file, &bytes).await {
                    Ok(()) => println!("Imagen guardada en {} ({} bytes)", file, bytes.len()),
                    Err(e) => eprintln!("No se pudo guardar {}: {}", file, e),
                },
                Ok(None) => println!("Primero busca un compuesto."),
                Err(e) => eprintln!("No se pudo descargar la imagen: {}", e),
            },
            "10" => match vm.current() {
                Some(record) => match serde_json::to_string_pretty(&*record) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Error: {}", e),
                },
                None => println!("Primero busca un compuesto."),
            },
            "0" => break,
            other => println!("Opción no válida: {}", other),
        }
        drain_notices(&mut notices);
    }
    Ok(())
}

async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>, AppError> {
    print!("{}", label);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

fn drain_notices(notices: &mut broadcast::Receiver<Notification>) {
    while let Ok(notice) = notices.try_recv() {
        println!("* {}", render_notification(&notice));
    }
}

async fn after_description(app: &App, outcome: Result<DescriptionOutcome, WorkflowError>, theme: chem_persistence::Theme) {
    match outcome {
        Ok(DescriptionOutcome::NoCompound) => println!("Primero busca un compuesto."),
        Ok(DescriptionOutcome::Discarded) | Ok(DescriptionOutcome::CredentialRequired) => {}
        Ok(_) => {
            if let Some(record) = app.view_model.current() {
                show_description(app, &record, theme).await;
            }
        }
        // El rechazo de la credencial ya llega como aviso.
        Err(WorkflowError::Persistence(chem_persistence::PersistenceError::Validation(_))) => {}
        Err(e) => eprintln!("Error: {}", e),
    }
}

async fn show_record(app: &App, record: &ViewRecord, theme: chem_persistence::Theme) {
    print!("{}", render_record(record, theme));
    println!("  Actualizado: {}",
             record.published_at.with_timezone(&chrono::Local).format("%H:%M:%S"));
    show_description(app, record, theme).await;
}

async fn show_description(app: &App, record: &ViewRecord, theme: chem_persistence::Theme) {
    println!("{}", description_heading(record, theme));
    match &record.description.text {
        DescriptionText::Generated(text) => {
            let mut shown = 0;
            let handle = app.revealer.start(&plain_math(text));
            handle.play(|frame| {
                      print!("{}", &frame[shown..]);
                      std::io::stdout().flush().ok();
                      shown = frame.len();
                  })
                  .await;
            println!();
        }
        other => println!("{}", plain_math(other.as_str())),
    }
}
