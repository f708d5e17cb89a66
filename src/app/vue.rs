// src/app/vue.rs
//
// Vue (UI egui), natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Historique en haut (feuille de calcul), entrée en dessous, pavé 5×5
// - Clavier : Enter évalue (quand le champ est focus)
// - Erreur de syntaxe : chaque caractère fautif est surligné sous l’entrée
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;
use egui::text::LayoutJob;

use super::aide::TEXTE_AIDE;
use super::etat::{AppCalc, Demarche, Ligne, Sortie, Touche, PAVE};
use crate::noyau::{self, format::format_resultat};

impl From<noyau::Demarche> for Demarche {
    fn from(d: noyau::Demarche) -> Self {
        Self {
            jetons: d.jetons,
            rpn: d.rpn,
            arbre: d.arbre,
        }
    }
}

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .id_salt("page")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice");
                ui.add_space(6.0);

                self.ui_historique(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });

        self.ui_aide(ui.ctx());
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                egui::ScrollArea::vertical()
                    .id_salt("historique")
                    .max_height(220.0)
                    .stick_to_bottom(true)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        if self.historique.is_empty() {
                            ui.weak("(aucun calcul)");
                        }
                        for ligne in &self.historique {
                            Self::ui_ligne(ui, ligne);
                        }
                    });
            });
    }

    fn ui_ligne(ui: &mut egui::Ui, ligne: &Ligne) {
        ui.monospace(ligne.expression.as_str());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
            match &ligne.sortie {
                Sortie::Valeur(v) => {
                    ui.monospace(format!("= {v}"));
                }
                Sortie::Erreur(e) => {
                    ui.colored_label(ui.visuals().error_fg_color, e);
                }
            }
        });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2*(4+|-5|), 3√27, 5!, 7%3")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if resp.changed() {
            // le surlignage ne correspond plus au texte
            self.erreur.clear();
            self.indices_erreur.clear();
        }

        // Si on a cliqué un bouton du pavé, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue ---
        // Un TextEdit singleline rend le focus sur Enter : on accepte les deux états.
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.evaluer();
        }

        if !self.indices_erreur.is_empty() {
            ui.add_space(4.0);
            let job = self.entree_surlignee(ui);
            ui.label(job);
        }

        if !self.erreur.is_empty() {
            ui.add_space(4.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    /// Copie de l’entrée, caractères fautifs en couleur d’erreur et soulignés.
    fn entree_surlignee(&self, ui: &egui::Ui) -> LayoutJob {
        let font_id = egui::TextStyle::Monospace.resolve(ui.style());
        let normal = ui.visuals().text_color();
        let rouge = ui.visuals().error_fg_color;

        let mut job = LayoutJob::default();
        for (i, c) in self.entree.chars().enumerate() {
            let fautif = self.indices_erreur.contains(&i);
            let format = egui::TextFormat {
                font_id: font_id.clone(),
                color: if fautif { rouge } else { normal },
                underline: if fautif {
                    egui::Stroke::new(1.5, rouge)
                } else {
                    egui::Stroke::NONE
                },
                ..Default::default()
            };
            job.append(&c.to_string(), 0.0, format);
        }
        job
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        let mut clique: Option<&'static str> = None;

        egui::Grid::new("pave_5x5")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE {
                    for etiquette in ligne {
                        let bouton = if etiquette == "=" {
                            egui::Button::new(egui::RichText::new(etiquette).strong())
                        } else {
                            egui::Button::new(etiquette)
                        };
                        if ui.add_sized([64.0, 36.0], bouton).clicked() {
                            clique = Some(etiquette);
                        }
                    }
                    ui.end_row();
                }
            });

        let Some(etiquette) = clique else {
            return;
        };
        tracing::debug!(touche = etiquette, "bouton");

        if let Some(touche) = Touche::depuis_etiquette(etiquette) {
            if self.appui(touche) {
                self.evaluer();
            }
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }

    fn ui_aide(&mut self, ctx: &egui::Context) {
        egui::Window::new("Aide")
            .open(&mut self.aide_ouverte)
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().id_salt("aide").show(ui, |ui| {
                    for paragraphe in TEXTE_AIDE.split("\n\n") {
                        ui.label(paragraphe);
                        ui.add_space(4.0);
                    }
                });
            });
    }

    /// Évalue l’entrée via le noyau, puis dépose résultat / erreur / démarche dans l’état UI.
    fn evaluer(&mut self) {
        if self.entree.trim().is_empty() {
            self.focus_entree = true;
            return;
        }

        // entrée complète (pas trim) : les indices d’erreur visent ses caractères
        match noyau::eval_expression(&self.entree) {
            Ok((Some(v), d)) => self.set_resultat(format_resultat(v), d.into()),
            Ok((None, _)) => self.clear_entree(),
            Err((e, d)) => match e.indices() {
                Some(indices) => {
                    let indices = indices.clone();
                    self.set_erreur_syntaxe(e.to_string(), indices);
                }
                None => self.set_erreur_calcul(e.to_string(), d.map(Demarche::from)),
            },
        }
    }
}
