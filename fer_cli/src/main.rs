//! # Suivifer Terminal Client
//!
//! Interactive terminal front-end for the ferraillage tracker. Navigation is
//! driven by the same access guard the web client uses: every pass through
//! the main loop re-evaluates the entitlement snapshot and lands on the
//! login, plan-selection, module-selection or application screen accordingly.
//!
//! The bar-weight calculator also works offline, without an account.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use fer_api::dto::{
    CreateEtatPayload, CreateMouvementPayload, CreateRapportPayload, CreateRestantPayload,
    FerEtatChantierFullDto, FerRapportDto, FerRestantFullDto, LigneInput, UpsertSnapshotPayload,
};
use fer_api::{ApiClient, Session};
use fer_core::aggregate::sum_text_rows;
use fer_core::entitlement::{price_dt, BillingCycle, Plan, SubModuleKey, MODULE_CATALOG};
use fer_core::guard::{GuardDecision, Location};
use fer_core::numfmt::{format_iso_date_fr, format_qty};
use fer_core::rapport::{matches_query, MouvementType};
use fer_core::routes;
use fer_core::wizard::{Calculator, RapportWizard, RowForm, RAPPORT_STEPS};

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    if io::stdout().flush().is_err() {
        return String::new();
    }
    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}

fn prompt_default(prompt: &str, default: &str) -> String {
    let raw = prompt_line(&format!("{prompt} [{default}]: "));
    if raw.is_empty() {
        default.to_string()
    } else {
        raw
    }
}

fn prompt_date(prompt: &str) -> Option<NaiveDate> {
    let raw = prompt_line(prompt);
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok()
}

fn confirm(prompt: &str) -> bool {
    let raw = prompt_line(&format!("{prompt} (o/N): ")).to_lowercase();
    raw == "o" || raw == "oui"
}

fn section(title: &str) {
    println!();
    println!("═══════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Suivifer - Suivi de ferraillage chantier");
    println!("========================================");
    println!();

    let client = match ApiClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Erreur: {e}");
            return;
        }
    };
    println!("API: {}", client.base());

    let mut session = Session::new(client);
    session.refresh().await;

    loop {
        let location = Location::parse(&routes::dashboard());
        match session.guard(&location) {
            GuardDecision::Loading => session.refresh().await,
            GuardDecision::RedirectToLogin(target) => {
                println!();
                println!("→ {target}");
                if !auth_screen(&mut session).await {
                    break;
                }
            }
            GuardDecision::RedirectToPlan(target) => {
                println!();
                println!("→ {target}");
                if !plan_screen(&mut session).await {
                    break;
                }
            }
            GuardDecision::RedirectToModules(target) => {
                println!();
                println!("→ {target}");
                if !modules_screen(&mut session).await {
                    break;
                }
            }
            GuardDecision::Render => {
                if !app_menu(&mut session).await {
                    break;
                }
            }
        }
    }

    println!("Au revoir.");
}

// ----------------------------------------------------------------------
// Authentication and onboarding screens
// ----------------------------------------------------------------------

async fn auth_screen(session: &mut Session) -> bool {
    section("CONNEXION");
    println!("1) Se connecter");
    println!("2) Créer un compte");
    println!("3) Calculatrice ferraillage (hors ligne)");
    println!("q) Quitter");

    match prompt_line("> ").as_str() {
        "1" => {
            let email = prompt_line("Email: ");
            let password = prompt_line("Mot de passe: ");
            match session.login(&email, &password).await {
                Ok(()) => println!("Connecté."),
                Err(e) => println!("Erreur: {e}"),
            }
            true
        }
        "2" => {
            let email = prompt_line("Email: ");
            let password = prompt_line("Mot de passe: ");
            match session.signup(&email, &password).await {
                Ok(()) => println!("Compte créé."),
                Err(e) => println!("Erreur: {e}"),
            }
            true
        }
        "3" => {
            offline_calculator();
            true
        }
        "q" => false,
        _ => true,
    }
}

async fn plan_screen(session: &mut Session) -> bool {
    section("CHOISISSEZ VOTRE ABONNEMENT");
    if session
        .entitlement()
        .subscription
        .as_ref()
        .map(|s| s.expired)
        .unwrap_or(false)
    {
        println!("Abonnement expiré - veuillez renouveler pour continuer.");
    }

    println!(
        "Plans: 1) {} (1 accès)  2) {} (plusieurs accès)",
        Plan::Individual.label_fr(),
        Plan::Enterprise.label_fr()
    );
    let plan = match prompt_default("Plan", "1").as_str() {
        "2" => Plan::Enterprise,
        _ => Plan::Individual,
    };

    println!(
        "Période: 1) {} ({} DT)  2) {} ({} DT, 10% de réduction)",
        BillingCycle::Monthly.label_fr(),
        price_dt(BillingCycle::Monthly),
        BillingCycle::Yearly.label_fr(),
        price_dt(BillingCycle::Yearly)
    );
    let cycle = match prompt_default("Période", "1").as_str() {
        "2" => BillingCycle::Yearly,
        _ => BillingCycle::Monthly,
    };

    println!(
        "Résumé: {} • {} • {} DT",
        plan.label_fr(),
        cycle.label_fr(),
        price_dt(cycle)
    );
    if !confirm("Continuer ?") {
        return !confirm("Quitter Suivifer ?");
    }

    match session.client().select_plan(plan, cycle).await {
        Ok(()) => {
            session.refresh().await;
            println!("Plan enregistré.");
        }
        Err(e) => println!("Erreur: {e}"),
    }
    true
}

async fn modules_screen(session: &mut Session) -> bool {
    section("CHOISISSEZ VOS MODULES");

    // Backend catalog when reachable, static cards otherwise.
    match session.client().list_modules().await {
        Ok(modules) => {
            for m in &modules {
                println!("- {} ({})", m.name, m.key.as_str());
            }
        }
        Err(e) => {
            println!("Erreur: {e}");
            for card in MODULE_CATALOG.iter() {
                let badge = card.badge.map(|b| format!(" [{b}]")).unwrap_or_default();
                println!("- {}{badge}: {}", card.title, card.desc);
            }
        }
    }

    let mut module_keys = Vec::new();
    for card in MODULE_CATALOG.iter() {
        if confirm(&format!("Activer {} ?", card.title)) {
            module_keys.push(card.key);
        }
    }
    if module_keys.is_empty() {
        println!("Sélectionnez au moins un module pour accéder au tableau de bord.");
        return !confirm("Quitter Suivifer ?");
    }

    let raw = prompt_default("Sous-modules (séparés par des virgules)", "FERRAILLAGE");
    let sub_module_keys: Vec<SubModuleKey> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(SubModuleKey::new)
        .collect();

    match session
        .client()
        .select_modules(module_keys, sub_module_keys)
        .await
    {
        Ok(()) => {
            session.refresh().await;
            println!("Modules enregistrés.");
        }
        Err(e) => println!("Erreur: {e}"),
    }
    true
}

// ----------------------------------------------------------------------
// Application screens
// ----------------------------------------------------------------------

async fn app_menu(session: &mut Session) -> bool {
    section("TABLEAU DE BORD");
    if let Some(user) = &session.entitlement().user {
        println!("Connecté: {}", user.email);
    }
    println!("1) Rapports ferraillage");
    println!("2) Créer un rapport");
    println!("3) Calculatrice ferraillage");
    println!("4) Se déconnecter");
    println!("q) Quitter");

    match prompt_line("> ").as_str() {
        "1" => {
            rapports_screen(session).await;
            true
        }
        "2" => {
            create_rapport_wizard(session).await;
            true
        }
        "3" => {
            offline_calculator();
            true
        }
        "4" => {
            match session.logout().await {
                Ok(()) => println!("Déconnecté."),
                Err(e) => println!("Erreur: {e}"),
            }
            true
        }
        "q" => false,
        _ => true,
    }
}

async fn rapports_screen(session: &mut Session) {
    section("RAPPORTS");
    let q = prompt_line("Recherche (vide = tous): ");
    let query = if q.is_empty() { None } else { Some(q.as_str()) };

    let items = match session.client().list_rapports(query).await {
        Ok(items) => items,
        Err(e) => {
            println!("Erreur: {e}");
            return;
        }
    };

    let filtered: Vec<&FerRapportDto> = items
        .iter()
        .filter(|r| matches_query(&r.chantier_name, r.sous_traitant.as_deref(), &q))
        .collect();

    if filtered.is_empty() {
        println!("Aucun rapport.");
        return;
    }
    for (idx, r) in filtered.iter().enumerate() {
        let st = r.sous_traitant.as_deref().unwrap_or("—");
        println!(
            "{}) {}  •  {}  •  créé le {}",
            idx + 1,
            r.chantier_name,
            st,
            format_iso_date_fr(Some(&r.created_at))
        );
        println!("   {}", routes::ferraillage_rapport_view(&r.id));
    }

    let choice = prompt_line("Numéro à ouvrir (d<N> pour supprimer, vide = retour): ");
    if choice.is_empty() {
        return;
    }
    if let Some(num) = choice.strip_prefix('d') {
        if let Some(r) = num
            .parse::<usize>()
            .ok()
            .and_then(|n| filtered.get(n.saturating_sub(1)))
        {
            if confirm("Supprimer ce rapport ?") {
                match session.client().delete_rapport(&r.id).await {
                    Ok(()) => println!("Rapport supprimé."),
                    Err(e) => println!("Erreur: {e}"),
                }
            }
        }
        return;
    }
    if let Some(r) = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| filtered.get(n.saturating_sub(1)))
    {
        view_rapport(session, &r.id).await;
    }
}

async fn view_rapport(session: &mut Session, rapport_id: &str) {
    let etat = session.client().etat_by_rapport(rapport_id).await;
    let restant = session.client().restant_by_rapport(rapport_id).await;
    let diametres = session.client().list_diametres().await;

    let (etat, restant, diametres) = match (etat, restant, diametres) {
        (Ok(e), Ok(r), Ok(d)) => (e, r, d),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            println!("Erreur: {e}");
            return;
        }
    };

    // Columns: active catalog entries, else every diameter seen in the data.
    let mut mm_cols: Vec<u32> = diametres
        .iter()
        .filter(|d| d.is_active)
        .map(|d| d.mm)
        .collect();
    mm_cols.sort_unstable();
    if mm_cols.is_empty() {
        let mut seen: Vec<u32> = etat
            .iter()
            .flat_map(|e| e.mouvements.iter())
            .flat_map(|m| m.lignes.iter().map(|l| l.diametre.mm))
            .chain(
                restant
                    .iter()
                    .flat_map(|r| r.snapshots.iter())
                    .flat_map(|s| s.lignes.iter().map(|l| l.diametre.mm)),
            )
            .collect();
        seen.sort_unstable();
        seen.dedup();
        mm_cols = seen;
    }

    if etat.is_none() && restant.is_none() {
        println!("Aucun Etat de chantier ni Restant non confectionné pour ce rapport.");
        return;
    }

    if let Some(etat) = &etat {
        print_etat_table(etat, &mm_cols);
    } else {
        println!("Aucun Etat de chantier pour ce rapport.");
    }

    if let Some(restant) = &restant {
        print_restant_table(restant, &mm_cols);
    } else {
        println!("Aucun Restant non confectionné pour ce rapport.");
    }
}

fn print_etat_table(etat: &FerEtatChantierFullDto, mm_cols: &[u32]) {
    section("ETAT DE FER LIVRE AU CHANTIER");
    println!("Etat Date: {}", format_iso_date_fr(etat.etat.etat_date.as_deref()));

    let rows: Vec<std::collections::BTreeMap<u32, String>> = etat
        .mouvements
        .iter()
        .map(|m| m.lignes.iter().map(|l| (l.diametre.mm, l.qty.clone())).collect())
        .collect();

    if etat.mouvements.is_empty() {
        println!("Aucun mouvement.");
        return;
    }

    for (m, qty_by_mm) in etat.mouvements.iter().zip(rows.iter()) {
        let bon = m.bon_livraison.as_deref().unwrap_or("—");
        let note = m.note.as_deref().unwrap_or("");
        println!(
            "{}  {:<10}  {}  {}",
            format_iso_date_fr(Some(&m.date)),
            m.kind,
            bon,
            note
        );
        for &mm in mm_cols {
            if let Some(q) = qty_by_mm.get(&mm) {
                println!("    Fer de {mm}: {q}");
            }
        }
    }

    let totals = sum_text_rows(rows.iter(), mm_cols);
    println!("TOTAL:");
    for &mm in mm_cols {
        println!("    Fer de {mm}: {}", format_qty(totals.get(&mm).copied().unwrap_or(0.0)));
    }
}

fn print_restant_table(restant: &FerRestantFullDto, mm_cols: &[u32]) {
    section("QUANTITE RESTANTE NON CONFECTIONNE");
    println!(
        "Rapport Date: {}",
        format_iso_date_fr(restant.restant.rapport_date.as_deref())
    );

    let rows: Vec<std::collections::BTreeMap<u32, String>> = restant
        .snapshots
        .iter()
        .map(|s| s.lignes.iter().map(|l| (l.diametre.mm, l.qty.clone())).collect())
        .collect();

    if restant.snapshots.is_empty() {
        println!("Aucun snapshot.");
        return;
    }

    for (s, qty_by_mm) in restant.snapshots.iter().zip(rows.iter()) {
        let note = s.note.as_deref().unwrap_or("");
        println!("{}  {}", format_iso_date_fr(Some(&s.date)), note);
        for &mm in mm_cols {
            if let Some(q) = qty_by_mm.get(&mm) {
                println!("    Fer de {mm}: {q}");
            }
        }
    }

    let totals = sum_text_rows(rows.iter(), mm_cols);
    println!("TOTAL:");
    for &mm in mm_cols {
        println!("    Fer de {mm}: {}", format_qty(totals.get(&mm).copied().unwrap_or(0.0)));
    }
}

// ----------------------------------------------------------------------
// Rapport creation wizard
// ----------------------------------------------------------------------

async fn create_rapport_wizard(session: &mut Session) {
    let mut wizard = RapportWizard::new();

    loop {
        section(&format!(
            "CRÉER RAPPORT - Étape {}/{} : {}",
            wizard.step() + 1,
            RAPPORT_STEPS.len(),
            wizard.step_label()
        ));

        match wizard.step() {
            0 => {
                if !step_projet_diametres(&mut wizard) {
                    println!("Annulé.");
                    return;
                }
            }
            1 => step_rapport_attachement(&mut wizard),
            2 | 3 => {
                println!("Résumé + validation (rien à saisir dans cette version).");
            }
            _ => {
                print_wizard_recap(&wizard);
                if confirm("Terminer et enregistrer ?") {
                    submit_wizard(session, &wizard).await;
                    return;
                }
            }
        }

        match prompt_line("Navigation (s=suivant, p=précédent, a=annuler): ").as_str() {
            "s" => {
                if !wizard.step_valid() {
                    println!("Étape invalide: aucun diamètre sélectionné.");
                }
                if wizard.is_last_step() {
                    continue;
                }
                wizard.next();
            }
            "p" => wizard.back(),
            "a" => {
                println!("Annulé.");
                return;
            }
            raw => {
                // Direct step jump via the stepper, unconditional.
                if let Ok(step) = raw.parse::<usize>() {
                    wizard.jump(step.saturating_sub(1));
                }
            }
        }
    }
}

fn step_projet_diametres(wizard: &mut RapportWizard) -> bool {
    wizard.draft.chantier_name = prompt_default("Chantier", &wizard.draft.chantier_name);
    wizard.draft.sous_traitant = prompt_default("Sous-traitant", &wizard.draft.sous_traitant);
    let acier = prompt_default("Type d'acier (F400/F500)", wizard.draft.acier_type.as_str());
    wizard.draft.acier_type = match acier.to_uppercase().as_str() {
        "F400" => fer_core::wizard::AcierType::F400,
        _ => fer_core::wizard::AcierType::F500,
    };

    loop {
        let known = wizard.draft.diameters.known_vec();
        let selected = wizard.draft.diameters.selected_vec();
        println!("Diamètres connus: {known:?}");
        println!("Diamètres actifs: {selected:?}");
        println!("Commandes: t <mm> (cocher/décocher), avant, apres, suppr-min, suppr-max, ok");

        let raw = prompt_line("> ");
        match raw.as_str() {
            "ok" => return true,
            "avant" => {
                match wizard.extend_before() {
                    Some(mm) => println!("Ajouté: Fer {mm}"),
                    None => println!("Impossible de descendre sous 1 mm."),
                }
            }
            "apres" => {
                if let Some(mm) = wizard.extend_after() {
                    println!("Ajouté: Fer {mm}");
                }
            }
            "suppr-min" => {
                if !wizard.remove_first_extra() {
                    println!("Le minimum fait partie de la gamme standard.");
                }
            }
            "suppr-max" => {
                if !wizard.remove_last_extra() {
                    println!("Le maximum fait partie de la gamme standard.");
                }
            }
            "a" => return false,
            _ => {
                if let Some(mm) = raw.strip_prefix("t ").and_then(|s| s.trim().parse::<u32>().ok())
                {
                    wizard.toggle_mm(mm);
                }
            }
        }
    }
}

fn step_rapport_attachement(wizard: &mut RapportWizard) {
    let mms = wizard.draft.diameters.selected_vec();
    if mms.is_empty() {
        println!("Aucun diamètre sélectionné. Retourne à l'étape \"Projet & Diamètres\".");
        return;
    }

    loop {
        println!(
            "Mouvements: {}  •  Restants: {}",
            wizard.draft.mouvements.len(),
            wizard.draft.restants.len()
        );
        println!("Commandes: m (ajouter mouvement), r (ajouter restant), total, ok");
        match prompt_line("> ").as_str() {
            "ok" => return,
            "m" => {
                if let Some(row_form) = fill_row_form(&mms, true) {
                    match row_form.submit_mouvement() {
                        Ok(row) => wizard.add_mouvement(row),
                        Err(e) => println!("Erreur: {e}"),
                    }
                }
            }
            "r" => {
                if let Some(row_form) = fill_row_form(&mms, false) {
                    match row_form.submit_restant() {
                        Ok(row) => wizard.add_restant(row),
                        Err(e) => println!("Erreur: {e}"),
                    }
                }
            }
            "total" => {
                let totals = wizard.total_mouvements();
                println!("TOTAL mouvements:");
                for &mm in &mms {
                    println!("    Fer de {mm}: {}", format_qty(totals.get(&mm).copied().unwrap_or(0.0)));
                }
                let totals = wizard.total_restants();
                println!("TOTAL restants:");
                for &mm in &mms {
                    println!("    Fer de {mm}: {}", format_qty(totals.get(&mm).copied().unwrap_or(0.0)));
                }
            }
            _ => {}
        }
    }
}

fn fill_row_form(mms: &[u32], is_mouvement: bool) -> Option<RowForm> {
    let mut form = RowForm::new(mms);
    form.date = prompt_date("Date (YYYY-MM-DD): ");
    if form.date.is_none() {
        println!("Date obligatoire");
    }

    if is_mouvement {
        println!("Types: 1) LIVRAISON  2) TRANSFERT  3) AJUSTEMENT");
        form.kind = match prompt_default("Type", "1").as_str() {
            "2" => MouvementType::Transfert,
            "3" => MouvementType::Ajustement,
            _ => MouvementType::Livraison,
        };
        form.bon_livraison = prompt_line("N° Bon de livraison: ");
    }
    form.note = prompt_line("Note: ");

    let mut calculator = Calculator::new(mms);
    loop {
        println!("Quantités par diamètre:");
        for (&mm, value) in &form.values_by_mm {
            println!("    Fer de {mm}: {value}");
        }
        println!("Commandes: fer <mm> <valeur>, calc, valider, annuler");
        let raw = prompt_line("> ");
        match raw.as_str() {
            "valider" => return Some(form),
            "annuler" => return None,
            "calc" => run_calculator(&mut calculator, &mut form),
            _ => {
                let mut parts = raw.split_whitespace();
                if parts.next() == Some("fer") {
                    let mm = parts.next().and_then(|s| s.parse::<u32>().ok());
                    let value = parts.next();
                    if let (Some(mm), Some(value)) = (mm, value) {
                        if let Err(e) = form.set_value(mm, value) {
                            println!("Erreur: {e}");
                        }
                    }
                }
            }
        }
    }
}

fn run_calculator(calculator: &mut Calculator, form: &mut RowForm) {
    let mms: Vec<u32> = form.values_by_mm.keys().copied().collect();
    calculator.retarget(&mms);

    if let Ok(mm) = prompt_default("Diamètre", &calculator.mm.to_string()).parse::<u32>() {
        if mms.contains(&mm) {
            calculator.mm = mm;
        }
    }
    calculator.length_m = prompt_default("Longueur (m)", &calculator.length_m);
    calculator.bars = prompt_default("Nombre de barres", &calculator.bars);

    println!(
        "RÉSULTAT: {} Tn ({:.1} kg)  •  Formule: kg/m = d² / 162",
        calculator.result_tn(),
        calculator.kilograms()
    );
    match prompt_default("1) Remplacer  2) Ajouter  3) Ignorer", "3").as_str() {
        "1" => calculator.apply_replace(&mut form.values_by_mm),
        "2" => calculator.apply_add(&mut form.values_by_mm),
        _ => {}
    }
}

fn print_wizard_recap(wizard: &RapportWizard) {
    println!("Chantier:      {}", wizard.draft.chantier_name);
    println!("Sous-traitant: {}", wizard.draft.sous_traitant);
    println!("Type d'acier:  {}", wizard.draft.acier_type);
    println!("Diamètres:     {:?}", wizard.draft.diameters.selected_vec());
    println!(
        "Lignes:        {} mouvements, {} restants",
        wizard.draft.mouvements.len(),
        wizard.draft.restants.len()
    );

    println!();
    println!("Brouillon JSON:");
    if let Ok(json) = serde_json::to_string_pretty(&wizard.draft) {
        println!("{json}");
    }
}

async fn submit_wizard(session: &mut Session, wizard: &RapportWizard) {
    let payload = CreateRapportPayload {
        chantier_name: wizard.draft.chantier_name.clone(),
        sous_traitant: if wizard.draft.sous_traitant.is_empty() {
            None
        } else {
            Some(wizard.draft.sous_traitant.clone())
        },
    };

    let rapport = match session.client().create_rapport(&payload).await {
        Ok(r) => r,
        Err(e) => {
            println!("Erreur: {e}");
            return;
        }
    };
    println!("Rapport créé: {}", routes::ferraillage_rapport_view(&rapport.id));

    if !wizard.draft.mouvements.is_empty() {
        let etat_date = wizard.draft.mouvements.last().map(|m| m.date.to_string());
        let etat = session
            .client()
            .create_etat(&CreateEtatPayload {
                rapport_id: rapport.id.clone(),
                etat_date,
            })
            .await;
        match etat {
            Ok(etat) => {
                for row in wizard.draft.mouvements.iter().rev() {
                    let payload = CreateMouvementPayload {
                        date: row.date.to_string(),
                        kind: Some(row.kind),
                        bon_livraison: Some(row.bon_livraison.clone()),
                        note: Some(row.note.clone()),
                        lignes: lignes_from_map(&row.qty_by_mm),
                    };
                    if let Err(e) = session.client().create_mouvement(&etat.id, &payload).await {
                        println!("Erreur: {e}");
                    }
                }
            }
            Err(e) => println!("Erreur: {e}"),
        }
    }

    if !wizard.draft.restants.is_empty() {
        let rapport_date = wizard.draft.restants.last().map(|r| r.date.to_string());
        let restant = session
            .client()
            .create_restant(&CreateRestantPayload {
                rapport_id: rapport.id.clone(),
                rapport_date,
            })
            .await;
        match restant {
            Ok(restant) => {
                for row in wizard.draft.restants.iter().rev() {
                    let payload = UpsertSnapshotPayload {
                        date: row.date.to_string(),
                        note: Some(row.note.clone()),
                        lignes: lignes_from_map(&row.qty_by_mm),
                    };
                    if let Err(e) = session.client().upsert_snapshot(&restant.id, &payload).await {
                        println!("Erreur: {e}");
                    }
                }
            }
            Err(e) => println!("Erreur: {e}"),
        }
    }

    println!("Enregistrement terminé.");
}

fn lignes_from_map(qty_by_mm: &std::collections::BTreeMap<u32, String>) -> Vec<LigneInput> {
    qty_by_mm
        .iter()
        .map(|(&mm, qty)| LigneInput {
            mm,
            qty: qty.clone(),
        })
        .collect()
}

// ----------------------------------------------------------------------
// Offline calculator
// ----------------------------------------------------------------------

fn offline_calculator() {
    section("CALCULATEUR FERRAILLAGE");
    println!("Formule: kg/m = d² / 162 (d en mm) • Conversion: 1 Tn = 1000 kg");

    let mut calculator = Calculator {
        mm: 12,
        length_m: "0".to_string(),
        bars: "1".to_string(),
    };

    loop {
        if let Ok(mm) = prompt_default("Diamètre (mm)", &calculator.mm.to_string()).parse::<u32>() {
            if mm >= 1 {
                calculator.mm = mm;
            }
        }
        calculator.length_m = prompt_default("Longueur (m)", &calculator.length_m);
        calculator.bars = prompt_default("Nombre de barres", &calculator.bars);

        println!(
            "RÉSULTAT: {} Tn ({:.1} kg)",
            calculator.result_tn(),
            calculator.kilograms()
        );

        if !confirm("Nouveau calcul ?") {
            return;
        }
    }
}
